//! The item store - single source of truth for the canvas.
//!
//! All mutations go through the store. Committing operations (add, delete,
//! clear, wholesale replace, gesture release) end by pushing a
//! renderable-stripped snapshot into the history log; continuous drag and
//! resize updates do not, so one gesture costs one undo step.

use rand::Rng;

use crate::history::{HistoryLog, Snapshot};
use crate::item::{CanvasItem, Geometry, ItemId, ItemKind, ItemPayload};
use crate::registry::ComponentRegistry;
use crate::render::RenderFactory;

/// Default size for website items.
const URL_SIZE: (f32, f32) = (400.0, 300.0);
/// Default size for chart items.
const CHART_SIZE: (f32, f32) = (400.0, 300.0);
/// Default size for note items.
const NOTE_SIZE: (f32, f32) = (300.0, 200.0);

/// Margin kept around existing items when picking a free spot.
const PLACEMENT_MARGIN: f32 = 100.0;
/// Attempts at a non-overlapping spot before giving up.
const PLACEMENT_ATTEMPTS: u32 = 10;

/// The canonical ordered collection of canvas items.
///
/// Insertion order is z-order for rendering (later items render on top).
/// The store owns the component registry and the renderer seam so it can
/// keep every item's derived renderable consistent with its payload and
/// geometry after every mutation.
pub struct ItemStore {
    items: Vec<CanvasItem>,
    history: HistoryLog,
    registry: ComponentRegistry,
    renderer: Box<dyn RenderFactory>,
}

impl ItemStore {
    /// Create an empty store and seed history with the initial state.
    #[must_use]
    pub fn new(registry: ComponentRegistry, renderer: Box<dyn RenderFactory>) -> Self {
        let mut store = Self {
            items: Vec::new(),
            history: HistoryLog::new(),
            registry,
            renderer,
        };
        store.history.commit(Vec::new());
        store
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// All items in z-order.
    #[must_use]
    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Z-order position of an item.
    #[must_use]
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == *id)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the canvas holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The undo/redo log.
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The component registry.
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Mutable access to the component registry.
    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add an item and commit a history snapshot.
    ///
    /// A fresh id is assigned as the smallest unused `{kind}-{n}` for the
    /// payload's kind. When `geometry` is omitted, size falls back to the
    /// registry's defaults (universal/component) or the kind default, and
    /// position to a pseudo-random free spot.
    ///
    /// Returns `None` (logged, nothing added) when the payload references a
    /// universal type the registry does not know.
    pub fn add_item(&mut self, payload: ItemPayload, geometry: Option<Geometry>) -> Option<ItemId> {
        if let ItemPayload::Universal { type_name, .. } = &payload {
            if !self.registry.has(type_name) {
                tracing::warn!("Cannot add item: component type {type_name:?} is not registered");
                return None;
            }
        }

        let kind = payload.kind();
        let id = self.generate_id(kind);
        let geometry = geometry.unwrap_or_else(|| self.default_geometry(&payload));

        let mut item = CanvasItem::new(id.clone(), payload, geometry);
        item.renderable = Some(self.renderer.build(&self.registry, &item.payload, geometry));
        self.items.push(item);
        self.commit();
        Some(id)
    }

    /// Move an item without committing history (continuous drag).
    ///
    /// No-op if the id is unknown. Position changes do not affect a card's
    /// appearance, so the renderable is left alone.
    pub fn update_position(&mut self, id: &ItemId, x: f32, y: f32) {
        let Some(item) = self.items.iter_mut().find(|item| item.id == *id) else {
            tracing::debug!("update_position: no item {id}");
            return;
        };
        item.geometry.x = x;
        item.geometry.y = y;
    }

    /// Resize an item without committing history (continuous resize).
    ///
    /// Rebuilds the renderable for kinds whose presentation depends on size
    /// (charts, notes, websites). No-op if the id is unknown.
    pub fn update_size(&mut self, id: &ItemId, width: f32, height: f32) {
        let Some(index) = self.index_of(id) else {
            tracing::debug!("update_size: no item {id}");
            return;
        };
        self.items[index].geometry.width = width;
        self.items[index].geometry.height = height;

        if matches!(
            self.items[index].kind(),
            ItemKind::Chart | ItemKind::Note | ItemKind::Url
        ) {
            let rebuilt = self.renderer.build(
                &self.registry,
                &self.items[index].payload,
                self.items[index].geometry,
            );
            self.items[index].renderable = Some(rebuilt);
        }
    }

    /// Commit the current state once a drag/resize gesture completes.
    pub fn commit_geometry(&mut self) {
        self.commit();
    }

    /// Remove an item by id and commit. Returns whether anything was removed.
    pub fn delete_item(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != *id);
        if self.items.len() == before {
            tracing::debug!("delete_item: no item {id}");
            return false;
        }
        self.commit();
        true
    }

    /// Remove every item and commit.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Replace the collection wholesale (load/import/auto-layout) and
    /// commit one snapshot. Renderables are rebuilt for every item.
    pub fn replace_all(&mut self, items: Vec<CanvasItem>) {
        self.items = items
            .into_iter()
            .map(|item| self.rebuild_item(item))
            .collect();
        self.commit();
    }

    /// Move several items at once (auto-layout write-back), committing a
    /// single snapshot. Unknown ids are skipped.
    pub fn apply_positions(&mut self, moves: &[(ItemId, f32, f32)]) {
        for (id, x, y) in moves {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == *id) {
                item.geometry.x = *x;
                item.geometry.y = *y;
            }
        }
        self.commit();
    }

    /// Step back one history snapshot. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Step forward one history snapshot. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Smallest unused `{kind}-{n}` id for the given kind.
    fn generate_id(&self, kind: ItemKind) -> ItemId {
        let mut n = 1;
        loop {
            let id = ItemId::new(kind, n);
            if self.get(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }

    /// Default geometry: registry dimensions for universal/component kinds,
    /// kind defaults otherwise, at a pseudo-random free position.
    fn default_geometry(&self, payload: &ItemPayload) -> Geometry {
        let (width, height) = match payload {
            ItemPayload::Url { .. } => URL_SIZE,
            ItemPayload::Chart { .. } => CHART_SIZE,
            ItemPayload::Note { .. } => NOTE_SIZE,
            ItemPayload::Component { type_name, .. } | ItemPayload::Universal { type_name, .. } => {
                let dims = self.registry.dimensions_for(type_name).unwrap_or_default();
                (dims.width, dims.height)
            }
        };
        let (x, y) = self.free_position(width, height);
        Geometry::new(x, y, width, height)
    }

    /// Pick a position that does not overlap existing items, falling back
    /// to an unchecked random spot after a few attempts.
    fn free_position(&self, width: f32, height: f32) -> (f32, f32) {
        let mut rng = rand::rng();
        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = rng.random_range(0.0..800.0) + PLACEMENT_MARGIN;
            let y = rng.random_range(0.0..600.0) + PLACEMENT_MARGIN;

            let overlaps = self.items.iter().any(|item| {
                x < item.geometry.x + item.geometry.width + PLACEMENT_MARGIN
                    && x + width > item.geometry.x - PLACEMENT_MARGIN
                    && y < item.geometry.y + item.geometry.height + PLACEMENT_MARGIN
                    && y + height > item.geometry.y - PLACEMENT_MARGIN
            });
            if !overlaps {
                return (x, y);
            }
        }
        (
            rng.random_range(0.0..400.0) + PLACEMENT_MARGIN,
            rng.random_range(0.0..400.0) + PLACEMENT_MARGIN,
        )
    }

    fn rebuild_item(&self, mut item: CanvasItem) -> CanvasItem {
        item.renderable = Some(self.renderer.build(&self.registry, &item.payload, item.geometry));
        item
    }

    /// Replace the live items from a history snapshot without committing.
    fn restore(&mut self, snapshot: Snapshot) {
        self.items = snapshot
            .into_iter()
            .map(|item| self.rebuild_item(item))
            .collect();
    }

    fn commit(&mut self) {
        let snapshot: Snapshot = self.items.iter().map(CanvasItem::stripped).collect();
        self.history.commit(snapshot);
    }
}
