//! Renderable node trees - the derived presentation form of an item.
//!
//! A [`Renderable`] is pure data: a small declarative tree of frames, text
//! runs, and chart marks that a host (DOM, SVG, TUI) can paint however it
//! likes. The store rebuilds it from `(payload, geometry)` whenever either
//! changes; it never reaches history snapshots or serialized output.

use serde::{Deserialize, Serialize};

use crate::item::{Geometry, ItemPayload};
use crate::registry::ComponentRegistry;

/// Style hints attached to a node. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    /// Background color as hex.
    #[serde(default)]
    pub background: Option<String>,
    /// Text/foreground color as hex.
    #[serde(default)]
    pub color: Option<String>,
    /// Border color as hex.
    #[serde(default)]
    pub border: Option<String>,
    /// Font size in pixels.
    #[serde(default)]
    pub font_size: Option<f32>,
    /// Padding in pixels.
    #[serde(default)]
    pub padding: Option<f32>,
}

impl NodeStyle {
    /// Style with just a background color.
    #[must_use]
    pub fn background(color: impl Into<String>) -> Self {
        Self {
            background: Some(color.into()),
            ..Self::default()
        }
    }
}

/// Stacking direction of a frame's children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameDirection {
    /// Children stack top to bottom.
    #[default]
    Vertical,
    /// Children flow left to right.
    Horizontal,
}

/// One node of a renderable tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum RenderNode {
    /// A layout container for child nodes.
    Frame {
        /// Stacking direction.
        #[serde(default)]
        direction: FrameDirection,
        /// Child nodes.
        children: Vec<RenderNode>,
        /// Optional styling.
        #[serde(default)]
        style: Option<NodeStyle>,
    },

    /// A text run.
    Text {
        /// Text content.
        content: String,
        /// Optional styling.
        #[serde(default)]
        style: Option<NodeStyle>,
    },

    /// A bar mark, sized as a fraction of the plot height.
    Bar {
        /// Height fraction in `0.0..=1.0`.
        fraction: f32,
        /// Axis label under the bar.
        #[serde(default)]
        label: Option<String>,
        /// Fill color as hex.
        fill: String,
    },

    /// A polyline through points normalized to a 100x100 plot box.
    Polyline {
        /// Normalized `(x, y)` vertices.
        points: Vec<(f32, f32)>,
        /// Stroke color as hex.
        stroke: String,
    },

    /// A point marker in the same normalized plot box as [`RenderNode::Polyline`].
    Dot {
        /// Normalized x.
        x: f32,
        /// Normalized y.
        y: f32,
        /// Fill color as hex.
        fill: String,
    },

    /// A closed path in a 100x100 viewbox (pie/donut slice).
    Path {
        /// SVG-style path data.
        d: String,
        /// Fill color as hex.
        fill: String,
    },

    /// A labelled metric tile.
    Metric {
        /// Metric label.
        label: String,
        /// Formatted value.
        value: String,
    },

    /// An embedded external page.
    Embed {
        /// Page address.
        url: String,
        /// Frame title.
        title: String,
    },

    /// Inline error placeholder shown when a renderer fails.
    ErrorCard {
        /// The component type that failed to render.
        type_name: String,
        /// Failure description.
        message: String,
    },
}

/// The derived presentation handle of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    /// Root of the node tree.
    pub root: RenderNode,
}

impl Renderable {
    /// Wrap a node tree.
    #[must_use]
    pub fn new(root: RenderNode) -> Self {
        Self { root }
    }

    /// The inline error card scoped to one failed item.
    #[must_use]
    pub fn error_placeholder(type_name: &str, message: &str) -> Self {
        Self::new(RenderNode::ErrorCard {
            type_name: type_name.to_string(),
            message: message.to_string(),
        })
    }
}

/// Builds the derived presentation handle for an item.
///
/// Implementations must be pure: the same payload and geometry always yield
/// the same tree. The store calls this on insert, on size changes that
/// affect appearance, and after every deserialization.
pub trait RenderFactory {
    /// Build the renderable for `payload` at `geometry`.
    fn build(
        &self,
        registry: &ComponentRegistry,
        payload: &ItemPayload,
        geometry: Geometry,
    ) -> Renderable;
}

/// Headless fallback renderer producing minimal placeholder cards.
///
/// Useful for tests and for embedders that paint items from the payload
/// directly. The full card renderer lives in `mural-render`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl RenderFactory for PlainRenderer {
    fn build(
        &self,
        registry: &ComponentRegistry,
        payload: &ItemPayload,
        geometry: Geometry,
    ) -> Renderable {
        match payload {
            ItemPayload::Universal { type_name, props } => registry
                .create_component(type_name, props, geometry)
                .unwrap_or_else(|| {
                    Renderable::error_placeholder(type_name, "component unavailable")
                }),
            _ => {
                let label = payload
                    .title()
                    .map_or_else(|| payload.kind().label().to_string(), str::to_string);
                Renderable::new(RenderNode::Text {
                    content: label,
                    style: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_placeholder_carries_type_and_message() {
        let r = Renderable::error_placeholder("weather", "bad props");
        match r.root {
            RenderNode::ErrorCard { type_name, message } => {
                assert_eq!(type_name, "weather");
                assert_eq!(message, "bad props");
            }
            other => panic!("expected ErrorCard, got {other:?}"),
        }
    }

    #[test]
    fn plain_renderer_uses_title() {
        let r = PlainRenderer.build(
            &ComponentRegistry::new(),
            &ItemPayload::Note {
                title: "Shopping".to_string(),
                content: String::new(),
                color: crate::item::NoteColor::Yellow,
            },
            Geometry::default(),
        );
        assert_eq!(
            r.root,
            RenderNode::Text {
                content: "Shopping".to_string(),
                style: None
            }
        );
    }
}
