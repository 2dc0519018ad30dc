//! Linear undo/redo history of full item-collection snapshots.
//!
//! Drag gestures commit a single snapshot on release rather than one per
//! pointer move, so undo steps over a whole gesture at once.

use crate::item::CanvasItem;

/// One recorded state of the item collection (renderables stripped).
pub type Snapshot = Vec<CanvasItem>;

/// Branch-discarding undo/redo log.
///
/// The cursor points at the snapshot matching the live store. Committing
/// after an undo truncates the redo branch; there is no merge.
#[derive(Debug, Default)]
pub struct HistoryLog {
    snapshots: Vec<Snapshot>,
    /// Index of the current snapshot; `None` before the first commit.
    cursor: Option<usize>,
}

impl HistoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot, discarding any redo branch.
    pub fn commit(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot and return the state to restore.
    ///
    /// No-op (returns `None`) at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.snapshots.get(c - 1)
            }
            _ => None,
        }
    }

    /// Step forward one snapshot and return the state to restore.
    ///
    /// No-op (returns `None`) at the newest snapshot.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        match self.cursor {
            Some(c) if c + 1 < self.snapshots.len() => {
                self.cursor = Some(c + 1);
                self.snapshots.get(c + 1)
            }
            _ => None,
        }
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    /// Number of recorded snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the log holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Current cursor position, if any snapshot was recorded.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Geometry, ItemId, ItemKind, ItemPayload, NoteColor};

    fn note(n: usize) -> CanvasItem {
        CanvasItem::new(
            ItemId::new(ItemKind::Note, n),
            ItemPayload::Note {
                title: format!("note {n}"),
                content: String::new(),
                color: NoteColor::Yellow,
            },
            Geometry::default(),
        )
    }

    #[test]
    fn starts_empty() {
        let log = HistoryLog::new();
        assert!(log.is_empty());
        assert_eq!(log.cursor(), None);
        assert!(!log.can_undo());
        assert!(!log.can_redo());
    }

    #[test]
    fn undo_redo_walk() {
        let mut log = HistoryLog::new();
        log.commit(vec![]);
        log.commit(vec![note(1)]);
        log.commit(vec![note(1), note(2)]);
        assert_eq!(log.cursor(), Some(2));

        assert_eq!(log.undo().map(Vec::len), Some(1));
        assert_eq!(log.undo().map(Vec::len), Some(0));
        // At the oldest snapshot undo is a no-op.
        assert!(log.undo().is_none());
        assert_eq!(log.cursor(), Some(0));

        assert_eq!(log.redo().map(Vec::len), Some(1));
        assert_eq!(log.redo().map(Vec::len), Some(2));
        assert!(log.redo().is_none());
    }

    #[test]
    fn undo_then_redo_is_idempotent() {
        let mut log = HistoryLog::new();
        log.commit(vec![]);
        let snapshot = vec![note(1)];
        log.commit(snapshot.clone());

        log.undo().expect("one step back");
        let restored = log.redo().expect("one step forward").clone();
        assert_eq!(restored, snapshot);
        assert_eq!(log.cursor(), Some(1));
    }

    #[test]
    fn commit_discards_redo_branch() {
        let mut log = HistoryLog::new();
        log.commit(vec![]);
        log.commit(vec![note(1)]);
        log.commit(vec![note(1), note(2)]);

        log.undo().expect("back to one note");
        log.commit(vec![note(1), note(3)]);

        assert_eq!(log.len(), 3);
        assert!(!log.can_redo());
        assert!(log.redo().is_none());

        // The discarded branch stays gone after navigating again.
        let restored = log.undo().expect("back").clone();
        assert_eq!(restored, vec![note(1)]);
        let forward = log.redo().expect("forward").clone();
        assert_eq!(forward, vec![note(1), note(3)]);
    }
}
