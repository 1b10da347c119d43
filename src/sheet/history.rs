//! Bounded undo/redo history of canvas snapshots
//!
//! Linear-undo semantics: each recorded edit pushes a deep copy of the
//! pre-edit canvas and invalidates the entire redo stack. The undo stack is
//! capped; the oldest snapshot is evicted first.

use super::store::IndexGrid;

/// Maximum number of undo snapshots kept
pub const HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Default)]
pub struct EditHistory {
    undo_stack: Vec<IndexGrid>,
    redo_stack: Vec<IndexGrid>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-edit canvas; call once per discrete edit action,
    /// before its first pixel mutation
    pub fn record(&mut self, canvas: &IndexGrid) {
        // Any new edit invalidates the redo branch
        self.redo_stack.clear();
        self.undo_stack.push(canvas.clone());
        while self.undo_stack.len() > HISTORY_CAPACITY {
            self.undo_stack.remove(0);
        }
    }

    /// Swap the canvas with the most recent undo snapshot
    ///
    /// Returns false (and leaves the canvas alone) when there is nothing to
    /// undo; an empty stack is a defined no-op, not an error.
    pub fn undo(&mut self, canvas: &mut IndexGrid) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            self.redo_stack.push(std::mem::replace(canvas, snapshot));
            true
        } else {
            false
        }
    }

    /// Swap the canvas with the most recent redo snapshot
    pub fn redo(&mut self, canvas: &mut IndexGrid) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            self.undo_stack.push(std::mem::replace(canvas, snapshot));
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop all snapshots (used when a new sheet or metadata set is loaded)
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
