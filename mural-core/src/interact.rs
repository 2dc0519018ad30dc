//! Per-item drag and resize gestures.
//!
//! A gesture is a three-phase interaction: press captures the starting
//! offset, every pointer move applies an uncommitted geometry update, and
//! release performs the single history commit. There is no cancel path -
//! releasing always commits the last computed geometry.

use crate::item::{Geometry, ItemId};
use crate::store::ItemStore;

/// Minimum item width enforced while resizing.
pub const MIN_ITEM_WIDTH: f32 = 200.0;
/// Minimum item height enforced while resizing.
pub const MIN_ITEM_HEIGHT: f32 = 150.0;

/// The gesture in progress, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No gesture active.
    Idle,
    /// Dragging an item; the offset is pointer minus item origin at press.
    Dragging {
        /// Pointer x minus item x at press time.
        grab_x: f32,
        /// Pointer y minus item y at press time.
        grab_y: f32,
    },
    /// Resizing an item from its bottom-right corner.
    Resizing {
        /// Item geometry at press time.
        start: Geometry,
        /// Pointer x at press time.
        pointer_x: f32,
        /// Pointer y at press time.
        pointer_y: f32,
    },
}

/// Drives drag/resize gestures against the item store.
///
/// Holds no state of record: geometry lives in the store, and the
/// controller decides whether gestures are allowed at all (they are
/// rejected while a presentation mode is active).
#[derive(Debug)]
pub struct GestureController {
    state: GestureState,
    target: Option<ItemId>,
}

impl GestureController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            target: None,
        }
    }

    /// Current gesture state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// Start dragging `id` from the given pointer position.
    ///
    /// Returns `false` (and stays idle) if the item does not exist or a
    /// gesture is already active.
    pub fn press_drag(&mut self, store: &ItemStore, id: &ItemId, pointer_x: f32, pointer_y: f32) -> bool {
        if self.is_active() {
            return false;
        }
        let Some(item) = store.get(id) else {
            tracing::debug!("press_drag: no item {id}");
            return false;
        };
        self.state = GestureState::Dragging {
            grab_x: pointer_x - item.geometry.x,
            grab_y: pointer_y - item.geometry.y,
        };
        self.target = Some(id.clone());
        true
    }

    /// Start resizing `id` from the given pointer position.
    pub fn press_resize(&mut self, store: &ItemStore, id: &ItemId, pointer_x: f32, pointer_y: f32) -> bool {
        if self.is_active() {
            return false;
        }
        let Some(item) = store.get(id) else {
            tracing::debug!("press_resize: no item {id}");
            return false;
        };
        self.state = GestureState::Resizing {
            start: item.geometry,
            pointer_x,
            pointer_y,
        };
        self.target = Some(id.clone());
        true
    }

    /// Apply one pointer move as an uncommitted geometry update.
    ///
    /// Resize deltas are clamped so items never shrink below
    /// [`MIN_ITEM_WIDTH`] x [`MIN_ITEM_HEIGHT`].
    pub fn pointer_move(&mut self, store: &mut ItemStore, pointer_x: f32, pointer_y: f32) {
        let Some(id) = self.target.clone() else {
            return;
        };
        match self.state {
            GestureState::Idle => {}
            GestureState::Dragging { grab_x, grab_y } => {
                store.update_position(&id, pointer_x - grab_x, pointer_y - grab_y);
            }
            GestureState::Resizing {
                start,
                pointer_x: start_x,
                pointer_y: start_y,
            } => {
                let width = (start.width + pointer_x - start_x).max(MIN_ITEM_WIDTH);
                let height = (start.height + pointer_y - start_y).max(MIN_ITEM_HEIGHT);
                store.update_size(&id, width, height);
            }
        }
    }

    /// Finish the gesture, committing the final geometry as one undo step.
    pub fn release(&mut self, store: &mut ItemStore) {
        if self.is_active() {
            store.commit_geometry();
        }
        self.state = GestureState::Idle;
        self.target = None;
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemPayload, NoteColor};
    use crate::registry::ComponentRegistry;
    use crate::render::PlainRenderer;

    fn store_with_note() -> (ItemStore, ItemId) {
        let mut store = ItemStore::new(ComponentRegistry::new(), Box::new(PlainRenderer));
        let id = store
            .add_item(
                ItemPayload::Note {
                    title: "n".to_string(),
                    content: String::new(),
                    color: NoteColor::Yellow,
                },
                Some(Geometry::new(100.0, 100.0, 300.0, 200.0)),
            )
            .expect("added");
        (store, id)
    }

    #[test]
    fn drag_follows_pointer_minus_grab_offset() {
        let (mut store, id) = store_with_note();
        let mut gesture = GestureController::new();

        assert!(gesture.press_drag(&store, &id, 120.0, 130.0));
        gesture.pointer_move(&mut store, 220.0, 230.0);

        let g = store.get(&id).expect("item").geometry;
        assert!((g.x - 200.0).abs() < f32::EPSILON);
        assert!((g.y - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn gesture_commits_exactly_once_on_release() {
        let (mut store, id) = store_with_note();
        let committed = store.history().len();
        let mut gesture = GestureController::new();

        gesture.press_drag(&store, &id, 120.0, 130.0);
        gesture.pointer_move(&mut store, 140.0, 150.0);
        gesture.pointer_move(&mut store, 180.0, 190.0);
        gesture.pointer_move(&mut store, 50.0, 60.0);
        assert_eq!(store.history().len(), committed);

        gesture.release(&mut store);
        assert_eq!(store.history().len(), committed + 1);
        assert!(!gesture.is_active());
    }

    #[test]
    fn resize_clamps_to_minimum() {
        let (mut store, id) = store_with_note();
        let mut gesture = GestureController::new();

        assert!(gesture.press_resize(&store, &id, 400.0, 300.0));
        // Pull far up-left: would go negative without the clamp.
        gesture.pointer_move(&mut store, 0.0, 0.0);

        let g = store.get(&id).expect("item").geometry;
        assert!((g.width - MIN_ITEM_WIDTH).abs() < f32::EPSILON);
        assert!((g.height - MIN_ITEM_HEIGHT).abs() < f32::EPSILON);

        gesture.release(&mut store);
    }

    #[test]
    fn resize_grows_by_pointer_delta() {
        let (mut store, id) = store_with_note();
        let mut gesture = GestureController::new();

        gesture.press_resize(&store, &id, 400.0, 300.0);
        gesture.pointer_move(&mut store, 450.0, 380.0);

        let g = store.get(&id).expect("item").geometry;
        assert!((g.width - 350.0).abs() < f32::EPSILON);
        assert!((g.height - 280.0).abs() < f32::EPSILON);
    }

    #[test]
    fn press_on_missing_item_stays_idle() {
        let (store, _) = store_with_note();
        let mut gesture = GestureController::new();
        assert!(!gesture.press_drag(&store, &ItemId::from_string("note-9"), 0.0, 0.0));
        assert!(!gesture.is_active());
    }

    #[test]
    fn release_without_gesture_commits_nothing() {
        let (mut store, _) = store_with_note();
        let committed = store.history().len();
        let mut gesture = GestureController::new();
        gesture.release(&mut store);
        assert_eq!(store.history().len(), committed);
    }
}
