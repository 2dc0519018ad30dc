//! Layout engine - pure placement functions for the four view modes.
//!
//! Free placement uses each item's stored geometry directly. The functions
//! here compute the alternate arrangements: grid auto-layout targets (the
//! only ones written back to stored geometry), turnstile and carousel
//! view-layer overlays, and the viewport auto-fit transform. None of them
//! mutate their inputs.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::item::{CanvasItem, ItemId};

/// Padding added around the content when computing canvas bounds.
pub const BOUNDS_PADDING: f32 = 100.0;
/// Space between cells in the auto-layout grid.
pub const GRID_PADDING: f32 = 50.0;
/// Top-left origin of the auto-layout grid.
pub const GRID_ORIGIN: f32 = 100.0;
/// Viewport padding subtracted before computing the auto-fit scale.
pub const FIT_PADDING: f32 = 100.0;

/// Turnstile circle radius as a fraction of the smaller viewport edge.
const TURNSTILE_RADIUS_FACTOR: f32 = 0.3;
/// Offsets recentering a card on its circle position.
const CARD_OFFSET: (f32, f32) = (150.0, 100.0);
/// Offsets recentering the focused/current card on the viewport center.
const FOCUS_OFFSET: (f32, f32) = (200.0, 150.0);
/// Carousel slot advance: item width plus gap.
const CAROUSEL_SPACING: f32 = 450.0;

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Construct a viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

/// Per-item view-layer placement computed by a presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// X position in canvas pixels.
    pub x: f32,
    /// Y position in canvas pixels.
    pub y: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Stacking order (higher renders on top).
    pub z_index: i32,
}

/// The minimal padded rectangle covering all items, floored at the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub min_x: f32,
    /// Top edge.
    pub min_y: f32,
    /// Right edge.
    pub max_x: f32,
    /// Bottom edge.
    pub max_y: f32,
}

impl Bounds {
    /// Covered width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Covered height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// View-level transform applied by auto-fit. Not a geometry mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Uniform scale, always `<= 1.0`.
    pub scale: f32,
    /// Horizontal offset centering the scaled content.
    pub offset_x: f32,
    /// Vertical offset centering the scaled content.
    pub offset_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Compute the padded bounding box of all items, floored at the viewport.
///
/// With no items this is exactly the viewport rectangle.
#[must_use]
pub fn canvas_bounds(items: &[CanvasItem], viewport: Viewport) -> Bounds {
    if items.is_empty() {
        return Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: viewport.width,
            max_y: viewport.height,
        };
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for item in items {
        let g = item.geometry;
        min_x = min_x.min(g.x - BOUNDS_PADDING);
        min_y = min_y.min(g.y - BOUNDS_PADDING);
        max_x = max_x.max(g.x + g.width + BOUNDS_PADDING);
        max_y = max_y.max(g.y + g.height + BOUNDS_PADDING);
    }

    Bounds {
        min_x: min_x.min(0.0),
        min_y: min_y.min(0.0),
        max_x: max_x.max(viewport.width),
        max_y: max_y.max(viewport.height),
    }
}

/// Compute grid auto-layout target positions.
///
/// Items are sorted largest-area-first and placed row-major into a grid of
/// `ceil(sqrt(1.5 n))` columns whose cell size fits the largest item plus
/// padding. Deterministic: equal areas keep their insertion order. The
/// caller writes the targets back through the store.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn grid_targets(items: &[CanvasItem]) -> Vec<(ItemId, f32, f32)> {
    if items.is_empty() {
        return Vec::new();
    }

    let cols = (items.len() as f32 * 1.5).sqrt().ceil().max(1.0) as usize;
    let max_width = items
        .iter()
        .map(|item| item.geometry.width)
        .fold(0.0_f32, f32::max);
    let max_height = items
        .iter()
        .map(|item| item.geometry.height)
        .fold(0.0_f32, f32::max);
    let cell_width = max_width + GRID_PADDING;
    let cell_height = max_height + GRID_PADDING;

    let mut order: Vec<&CanvasItem> = items.iter().collect();
    order.sort_by(|a, b| {
        b.geometry
            .area()
            .partial_cmp(&a.geometry.area())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    order
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let col = (i % cols) as f32;
            let row = (i / cols) as f32;
            (
                item.id.clone(),
                GRID_ORIGIN + col * cell_width,
                GRID_ORIGIN + row * cell_height,
            )
        })
        .collect()
}

/// Compute the turnstile placement of one item.
///
/// The focused item moves to the viewport center at 1.1x scale on top;
/// everyone else sits on a circle at angle `2*pi*i/n`, dimmed and shrunk
/// further while some other item holds focus.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn turnstile_placement(
    index: usize,
    total: usize,
    any_focused: bool,
    is_focused: bool,
    viewport: Viewport,
) -> Placement {
    if is_focused && any_focused {
        return Placement {
            x: viewport.width / 2.0 - FOCUS_OFFSET.0,
            y: viewport.height / 2.0 - FOCUS_OFFSET.1,
            scale: 1.1,
            opacity: 1.0,
            z_index: 100,
        };
    }

    let center_x = viewport.width / 2.0;
    let center_y = viewport.height / 2.0;
    let radius = viewport.width.min(viewport.height) * TURNSTILE_RADIUS_FACTOR;
    let angle = index as f32 / total.max(1) as f32 * TAU;

    Placement {
        x: center_x + angle.cos() * radius - CARD_OFFSET.0,
        y: center_y + angle.sin() * radius - CARD_OFFSET.1,
        scale: if any_focused { 0.7 } else { 0.8 },
        opacity: if any_focused { 0.6 } else { 0.9 },
        z_index: 10,
    }
}

/// Compute the carousel placement of one item.
///
/// The current item is centered at full scale; the rest line up
/// horizontally at `(i - current) * slot` offsets, adjacent items more
/// visible than distant ones.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn carousel_placement(
    index: usize,
    total: usize,
    current: usize,
    viewport: Viewport,
) -> Placement {
    debug_assert!(total == 0 || current < total);
    let center_x = viewport.width / 2.0 - FOCUS_OFFSET.0;
    let center_y = viewport.height / 2.0 - FOCUS_OFFSET.1;

    if index == current {
        return Placement {
            x: center_x,
            y: center_y,
            scale: 1.0,
            opacity: 1.0,
            z_index: 100,
        };
    }

    let distance = index as isize - current as isize;
    let adjacent = distance.unsigned_abs() == 1;
    Placement {
        x: center_x + distance as f32 * CAROUSEL_SPACING,
        y: center_y,
        scale: 0.8,
        opacity: if adjacent { 0.7 } else { 0.3 },
        z_index: if adjacent { 50 } else { 10 },
    }
}

/// Compute the auto-fit transform bringing `bounds` fully into view.
///
/// The scale never exceeds 1.0 (content is not upscaled past 100%); the
/// offset centers the scaled content in the padded viewport.
#[must_use]
pub fn fit_transform(bounds: Bounds, viewport: Viewport) -> ViewTransform {
    let view_width = viewport.width - FIT_PADDING;
    let view_height = viewport.height - FIT_PADDING;
    let content_width = bounds.width();
    let content_height = bounds.height();

    let scale = (view_width / content_width)
        .min(view_height / content_height)
        .min(1.0);

    ViewTransform {
        scale,
        offset_x: (view_width - content_width * scale) / 2.0,
        offset_y: (view_height - content_height * scale) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{CanvasItem, Geometry, ItemKind, ItemPayload, NoteColor};

    fn note_at(n: usize, x: f32, y: f32, w: f32, h: f32) -> CanvasItem {
        CanvasItem::new(
            ItemId::new(ItemKind::Note, n),
            ItemPayload::Note {
                title: format!("n{n}"),
                content: String::new(),
                color: NoteColor::Yellow,
            },
            Geometry::new(x, y, w, h),
        )
    }

    #[test]
    fn bounds_floor_at_viewport() {
        let viewport = Viewport::new(1200.0, 800.0);
        let items = vec![note_at(1, 200.0, 200.0, 100.0, 100.0)];
        let bounds = canvas_bounds(&items, viewport);
        assert!((bounds.width() - 1200.0).abs() < f32::EPSILON);
        assert!((bounds.height() - 800.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bounds_grow_past_viewport() {
        let viewport = Viewport::new(1200.0, 800.0);
        let items = vec![note_at(1, 2000.0, 100.0, 400.0, 300.0)];
        let bounds = canvas_bounds(&items, viewport);
        assert!((bounds.max_x - 2500.0).abs() < f32::EPSILON);
        assert!((bounds.min_x - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_bounds_equal_viewport() {
        let viewport = Viewport::new(1000.0, 700.0);
        let bounds = canvas_bounds(&[], viewport);
        assert!((bounds.width() - 1000.0).abs() < f32::EPSILON);
        assert!((bounds.height() - 700.0).abs() < f32::EPSILON);
    }

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn grid_is_deterministic_and_collision_free() {
        let items = vec![
            note_at(1, 500.0, 10.0, 300.0, 200.0),
            note_at(2, 10.0, 900.0, 400.0, 300.0),
            note_at(3, 0.0, 0.0, 200.0, 150.0),
            note_at(4, 50.0, 50.0, 350.0, 250.0),
        ];

        let first = grid_targets(&items);
        let second = grid_targets(&items);
        assert_eq!(first, second);

        let mut cells: Vec<(i64, i64)> = first
            .iter()
            .map(|(_, x, y)| (*x as i64, *y as i64))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), items.len(), "target cells must not coincide");
    }

    #[test]
    fn grid_places_largest_first() {
        let items = vec![
            note_at(1, 0.0, 0.0, 200.0, 150.0),
            note_at(2, 0.0, 0.0, 400.0, 300.0),
        ];
        let targets = grid_targets(&items);
        // Largest item takes the first cell at the grid origin.
        assert_eq!(targets[0].0.as_str(), "note-2");
        assert!((targets[0].1 - GRID_ORIGIN).abs() < f32::EPSILON);
        assert!((targets[0].2 - GRID_ORIGIN).abs() < f32::EPSILON);
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn turnstile_angles_cover_the_circle() {
        let viewport = Viewport::default();
        let total = 8;
        let radius = viewport.width.min(viewport.height) * 0.3;
        for index in 0..total {
            let p = turnstile_placement(index, total, false, false, viewport);
            let angle = index as f32 / total as f32 * TAU;
            let expected_x = viewport.width / 2.0 + angle.cos() * radius - 150.0;
            let expected_y = viewport.height / 2.0 + angle.sin() * radius - 100.0;
            assert!((p.x - expected_x).abs() < 1e-3);
            assert!((p.y - expected_y).abs() < 1e-3);
            assert!((p.scale - 0.8).abs() < f32::EPSILON);
            assert!((p.opacity - 0.9).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn turnstile_focus_moves_only_the_focused_item() {
        let viewport = Viewport::default();
        let focused = turnstile_placement(2, 5, true, true, viewport);
        assert!((focused.x - (viewport.width / 2.0 - 200.0)).abs() < f32::EPSILON);
        assert!((focused.scale - 1.1).abs() < f32::EPSILON);
        assert!((focused.opacity - 1.0).abs() < f32::EPSILON);
        assert_eq!(focused.z_index, 100);

        let other = turnstile_placement(3, 5, true, false, viewport);
        assert!((other.scale - 0.7).abs() < f32::EPSILON);
        assert!((other.opacity - 0.6).abs() < f32::EPSILON);
        assert_eq!(other.z_index, 10);
    }

    #[test]
    fn carousel_centers_current_and_dims_the_rest() {
        let viewport = Viewport::default();
        let current = carousel_placement(2, 5, 2, viewport);
        assert!((current.scale - 1.0).abs() < f32::EPSILON);
        assert!((current.opacity - 1.0).abs() < f32::EPSILON);
        assert_eq!(current.z_index, 100);

        let adjacent = carousel_placement(3, 5, 2, viewport);
        assert!((adjacent.x - current.x - 450.0).abs() < f32::EPSILON);
        assert!((adjacent.opacity - 0.7).abs() < f32::EPSILON);
        assert_eq!(adjacent.z_index, 50);

        let far = carousel_placement(0, 5, 2, viewport);
        assert!((far.x - (current.x - 900.0)).abs() < f32::EPSILON);
        assert!((far.opacity - 0.3).abs() < f32::EPSILON);
        assert_eq!(far.z_index, 10);
    }

    #[test]
    fn fit_never_upscales() {
        let viewport = Viewport::new(1200.0, 800.0);

        // Content smaller than the viewport: scale capped at 1.
        let small = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 400.0,
            max_y: 300.0,
        };
        let t = fit_transform(small, viewport);
        assert!((t.scale - 1.0).abs() < f32::EPSILON);

        // Content larger than the viewport: scaled down to fit.
        let large = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 4400.0,
            max_y: 1400.0,
        };
        let t = fit_transform(large, viewport);
        assert!(t.scale <= 1.0);
        assert!((t.scale - (1100.0 / 4400.0)).abs() < 1e-4);

        // Scaled content fits the padded viewport.
        assert!(large.width() * t.scale <= viewport.width - FIT_PADDING + 1e-3);
        assert!(large.height() * t.scale <= viewport.height - FIT_PADDING + 1e-3);
    }
}
