//! The canvas controller - single mutating owner of the session.
//!
//! Everything flows through here: gestures, commands, mode switches, and
//! persistence. Subordinate pieces (layout engine, persistence adapter,
//! gesture controller) receive state by reference and report back through
//! return values; there is no second writer.

use std::collections::HashSet;

use crate::command::Command;
use crate::interact::GestureController;
use crate::item::{CanvasItem, Geometry, ItemId, ItemPayload};
use crate::layout::{self, Placement, Viewport, ViewTransform};
use crate::mode::{CarouselSettings, Transition, ViewMode};
use crate::persist::{self, CanvasStorage, Notification, PersistError};
use crate::registry::ComponentRegistry;
use crate::render::RenderFactory;
use crate::schema::CanvasConfig;
use crate::store::ItemStore;

/// Owns and mediates all canvas session state.
pub struct CanvasController {
    store: ItemStore,
    gesture: GestureController,
    mode: ViewMode,
    carousel: CarouselSettings,
    selection: HashSet<ItemId>,
    viewport: Viewport,
    view: ViewTransform,
    storage: Option<CanvasStorage>,
}

impl CanvasController {
    /// Create a controller with an empty canvas.
    #[must_use]
    pub fn new(
        registry: ComponentRegistry,
        renderer: Box<dyn RenderFactory>,
        viewport: Viewport,
    ) -> Self {
        Self {
            store: ItemStore::new(registry, renderer),
            gesture: GestureController::new(),
            mode: ViewMode::Free,
            carousel: CarouselSettings::default(),
            selection: HashSet::new(),
            viewport,
            view: ViewTransform::default(),
            storage: None,
        }
    }

    /// Attach saved-canvas storage.
    #[must_use]
    pub fn with_storage(mut self, storage: CanvasStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Seed the canvas from a config document, as one history step.
    pub fn load_config(&mut self, config: &CanvasConfig) {
        let items = persist::items_from_config(config, self.store.registry());
        self.store.replace_all(items);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The item store.
    #[must_use]
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// All items in z-order.
    #[must_use]
    pub fn items(&self) -> &[CanvasItem] {
        self.store.items()
    }

    /// Mutable access to the component registry (dynamic registration).
    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        self.store.registry_mut()
    }

    /// The active presentation mode.
    #[must_use]
    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Carousel presentation settings.
    #[must_use]
    pub fn carousel_settings(&self) -> &CarouselSettings {
        &self.carousel
    }

    /// Currently selected item ids.
    #[must_use]
    pub fn selection(&self) -> &HashSet<ItemId> {
        &self.selection
    }

    /// The auto-fit view transform.
    #[must_use]
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// The viewport used for layout computations.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the viewport dimensions.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.store.history().can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.store.history().can_redo()
    }

    // -----------------------------------------------------------------------
    // Item operations
    // -----------------------------------------------------------------------

    /// Add an item; see [`ItemStore::add_item`].
    pub fn add_item(&mut self, payload: ItemPayload, geometry: Option<Geometry>) -> Option<ItemId> {
        self.store.add_item(payload, geometry)
    }

    /// Delete an item. Rejected while a presentation mode is active.
    pub fn delete_item(&mut self, id: &ItemId) -> bool {
        if !self.mode.allows_editing() {
            tracing::debug!("delete_item ignored while {:?} is active", self.mode);
            return false;
        }
        self.selection.remove(id);
        self.store.delete_item(id)
    }

    /// Delete every selected item.
    pub fn delete_selected(&mut self) {
        if !self.mode.allows_editing() {
            return;
        }
        let selected: Vec<ItemId> = self.selection.drain().collect();
        for id in &selected {
            self.store.delete_item(id);
        }
    }

    /// Remove all items. Rejected while a presentation mode is active.
    pub fn clear(&mut self) {
        if !self.mode.allows_editing() {
            return;
        }
        self.selection.clear();
        self.store.clear();
    }

    /// Handle a click on an item.
    ///
    /// Free mode toggles selection; turnstile mode toggles focus on the
    /// clicked item (only one item may hold focus); carousel ignores
    /// clicks on the slides themselves.
    pub fn click_item(&mut self, id: &ItemId) {
        if self.store.get(id).is_none() {
            tracing::debug!("click_item: no item {id}");
            return;
        }
        match &mut self.mode {
            ViewMode::Free => {
                if !self.selection.remove(id) {
                    self.selection.insert(id.clone());
                }
            }
            ViewMode::Turnstile { focused } => {
                *focused = if focused.as_ref() == Some(id) {
                    None
                } else {
                    Some(id.clone())
                };
            }
            ViewMode::Carousel { .. } => {}
        }
    }

    /// Step back one history snapshot.
    pub fn undo(&mut self) -> bool {
        let changed = self.store.undo();
        if changed {
            self.retain_valid_selection();
        }
        changed
    }

    /// Step forward one history snapshot.
    pub fn redo(&mut self) -> bool {
        let changed = self.store.redo();
        if changed {
            self.retain_valid_selection();
        }
        changed
    }

    // -----------------------------------------------------------------------
    // Gestures
    // -----------------------------------------------------------------------

    /// Start dragging an item. Rejected while a presentation mode is active.
    pub fn begin_drag(&mut self, id: &ItemId, pointer_x: f32, pointer_y: f32) -> bool {
        self.mode.allows_editing() && self.gesture.press_drag(&self.store, id, pointer_x, pointer_y)
    }

    /// Start resizing an item. Rejected while a presentation mode is active.
    pub fn begin_resize(&mut self, id: &ItemId, pointer_x: f32, pointer_y: f32) -> bool {
        self.mode.allows_editing()
            && self.gesture.press_resize(&self.store, id, pointer_x, pointer_y)
    }

    /// Apply a pointer move to the gesture in progress.
    pub fn pointer_move(&mut self, pointer_x: f32, pointer_y: f32) {
        self.gesture.pointer_move(&mut self.store, pointer_x, pointer_y);
    }

    /// Release the pointer, committing the gesture's final geometry.
    pub fn end_gesture(&mut self) {
        self.gesture.release(&mut self.store);
    }

    // -----------------------------------------------------------------------
    // View modes
    // -----------------------------------------------------------------------

    /// Toggle turnstile mode. Entering resets focus and leaves carousel.
    pub fn toggle_turnstile(&mut self) {
        self.mode = if self.mode.is_turnstile() {
            ViewMode::Free
        } else {
            ViewMode::Turnstile { focused: None }
        };
    }

    /// Toggle carousel mode. Entering resets the index and leaves turnstile.
    pub fn toggle_carousel(&mut self) {
        self.mode = if self.mode.is_carousel() {
            ViewMode::Free
        } else {
            ViewMode::Carousel { index: 0 }
        };
    }

    /// Leave whichever presentation mode is active.
    pub fn exit_mode(&mut self) {
        self.mode = ViewMode::Free;
    }

    /// The focused item in turnstile mode, if any.
    #[must_use]
    pub fn focused_item(&self) -> Option<&ItemId> {
        match &self.mode {
            ViewMode::Turnstile { focused } => focused.as_ref(),
            _ => None,
        }
    }

    /// The current carousel slide index, when carousel mode is active.
    #[must_use]
    pub fn carousel_index(&self) -> Option<usize> {
        match self.mode {
            ViewMode::Carousel { index } => Some(index),
            _ => None,
        }
    }

    /// Advance the carousel one slide, wrapping at the end.
    pub fn carousel_next(&mut self) {
        let total = self.store.len();
        if let ViewMode::Carousel { index } = &mut self.mode {
            if total > 0 {
                *index = (*index + 1) % total;
            }
        }
    }

    /// Step the carousel back one slide, wrapping at the start.
    pub fn carousel_prev(&mut self) {
        let total = self.store.len();
        if let ViewMode::Carousel { index } = &mut self.mode {
            if total > 0 {
                *index = (*index + total - 1) % total;
            }
        }
    }

    /// Jump to a slide by index. Out-of-range indices are rejected.
    pub fn carousel_jump(&mut self, target: usize) {
        let total = self.store.len();
        if let ViewMode::Carousel { index } = &mut self.mode {
            if target < total {
                *index = target;
            }
        }
    }

    /// Toggle carousel autoplay.
    pub fn toggle_autoplay(&mut self) {
        self.carousel.autoplay = !self.carousel.autoplay;
    }

    /// Toggle the carousel thumbnail strip.
    pub fn toggle_thumbnails(&mut self) {
        self.carousel.thumbnails = !self.carousel.thumbnails;
    }

    /// Set the autoplay interval in milliseconds.
    pub fn set_carousel_speed(&mut self, interval_ms: u64) {
        self.carousel.interval_ms = interval_ms;
    }

    /// Set the carousel transition style.
    pub fn set_carousel_transition(&mut self, transition: Transition) {
        self.carousel.transition = transition;
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// View-layer placements for every item under the active mode.
    ///
    /// In free mode this is the stored geometry at full scale with z-order
    /// following insertion order.
    #[must_use]
    pub fn placements(&self) -> Vec<(ItemId, Placement)> {
        let total = self.store.len();
        self.store
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let placement = match &self.mode {
                    ViewMode::Free => {
                        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                        let z_index = index as i32;
                        Placement {
                            x: item.geometry.x,
                            y: item.geometry.y,
                            scale: 1.0,
                            opacity: 1.0,
                            z_index,
                        }
                    }
                    ViewMode::Turnstile { focused } => layout::turnstile_placement(
                        index,
                        total,
                        focused.is_some(),
                        focused.as_ref() == Some(&item.id),
                        self.viewport,
                    ),
                    ViewMode::Carousel { index: current } => {
                        layout::carousel_placement(index, total, *current, self.viewport)
                    }
                };
                (item.id.clone(), placement)
            })
            .collect()
    }

    /// View-layer placement of one item under the active mode.
    #[must_use]
    pub fn placement_of(&self, id: &ItemId) -> Option<Placement> {
        let index = self.store.index_of(id)?;
        self.placements().into_iter().nth(index).map(|(_, p)| p)
    }

    /// The padded bounding box of all items, floored at the viewport.
    ///
    /// Derived on demand; never stored or persisted.
    #[must_use]
    pub fn bounds(&self) -> layout::Bounds {
        layout::canvas_bounds(self.store.items(), self.viewport)
    }

    /// Scale and center the view so all items fit, never upscaling.
    pub fn auto_fit(&mut self) {
        if self.store.is_empty() {
            return;
        }
        self.view = layout::fit_transform(self.bounds(), self.viewport);
    }

    /// Arrange all items in a grid (one history step), then auto-fit.
    ///
    /// Leaves any presentation mode first: auto-layout is a free-placement
    /// operation.
    pub fn auto_layout(&mut self) {
        if self.store.is_empty() {
            return;
        }
        self.exit_mode();
        let targets = layout::grid_targets(self.store.items());
        self.store.apply_positions(&targets);
        self.auto_fit();
    }

    /// Return the view to 100% scale at the origin.
    pub fn reset_zoom(&mut self) {
        self.view = ViewTransform::default();
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Save the canvas to the attached storage.
    pub fn save(&mut self) -> Notification {
        let Some(storage) = &self.storage else {
            return Notification::SaveFailed("no storage attached".to_string());
        };
        match storage.save(self.store.registry(), self.store.items()) {
            Ok(()) => Notification::Saved,
            Err(e) => {
                tracing::warn!("Failed to save canvas: {e}");
                Notification::SaveFailed(e.to_string())
            }
        }
    }

    /// Load the saved canvas from the attached storage.
    ///
    /// On success the store is replaced wholesale and one history snapshot
    /// committed; on any failure the store is left untouched.
    pub fn load(&mut self) -> Notification {
        let Some(storage) = &self.storage else {
            return Notification::LoadFailed("no storage attached".to_string());
        };
        let record = match storage.load() {
            Ok(record) => record,
            Err(PersistError::NoSavedCanvas) => return Notification::NoSavedCanvas,
            Err(e) => {
                tracing::warn!("Failed to load canvas: {e}");
                return Notification::LoadFailed(e.to_string());
            }
        };

        let registry = self.store.registry();
        let items = record
            .items
            .into_iter()
            .map(|mut item| {
                if let ItemPayload::Universal { type_name, props } = &mut item.payload {
                    *props = registry.deserialize_props(type_name, std::mem::take(props));
                }
                item
            })
            .collect();

        self.selection.clear();
        self.store.replace_all(items);
        Notification::Loaded
    }

    /// Produce the export config document for the current canvas.
    #[must_use]
    pub fn export_config(&self) -> CanvasConfig {
        persist::export_config(self.store.registry(), self.store.items())
    }

    /// Produce the export config as downloadable JSON.
    #[must_use]
    pub fn export_json(&self) -> Option<String> {
        match self.export_config().to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!("Failed to export config: {e}");
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Command dispatch
    // -----------------------------------------------------------------------

    /// Execute one command from the keyboard surface.
    ///
    /// Returns a notification for operations the user expects feedback on
    /// (save/load/export); everything else returns `None`.
    pub fn dispatch(&mut self, command: Command) -> Option<Notification> {
        tracing::debug!(?command, "dispatching command");
        match command {
            Command::Save => Some(self.save()),
            Command::Load => Some(self.load()),
            Command::Export => Some(match self.export_json() {
                Some(_) => Notification::Exported,
                None => Notification::SaveFailed("export failed".to_string()),
            }),
            Command::Undo => {
                self.undo();
                None
            }
            Command::Redo => {
                self.redo();
                None
            }
            Command::DeleteSelected => {
                self.delete_selected();
                None
            }
            Command::Clear => {
                self.clear();
                None
            }
            Command::AutoFit => {
                self.auto_fit();
                None
            }
            Command::AutoLayout => {
                self.auto_layout();
                None
            }
            Command::ResetZoom => {
                self.reset_zoom();
                None
            }
            Command::ToggleTurnstile => {
                self.toggle_turnstile();
                None
            }
            Command::ToggleCarousel => {
                self.toggle_carousel();
                None
            }
            Command::CarouselNext => {
                self.carousel_next();
                None
            }
            Command::CarouselPrev => {
                self.carousel_prev();
                None
            }
            Command::CarouselJump(index) => {
                self.carousel_jump(index);
                None
            }
            Command::CarouselToggleAutoplay => {
                self.toggle_autoplay();
                None
            }
            Command::CarouselToggleThumbnails => {
                self.toggle_thumbnails();
                None
            }
            Command::CarouselSetSpeed(interval_ms) => {
                self.set_carousel_speed(interval_ms);
                None
            }
            Command::CarouselSetTransition(transition) => {
                self.set_carousel_transition(transition);
                None
            }
            Command::Escape => {
                self.exit_mode();
                None
            }
        }
    }

    /// Drop selection entries whose items no longer exist.
    fn retain_valid_selection(&mut self) {
        let store = &self.store;
        self.selection.retain(|id| store.get(id).is_some());
    }
}
