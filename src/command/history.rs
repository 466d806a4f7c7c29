use crate::pixel_buffer::{PixelBuffer, Snapshot};

/// History bound of the full editor.
pub const FULL_HISTORY_CAPACITY: usize = 20;
/// History bound of the simplified drawing variant.
pub const SIMPLE_HISTORY_CAPACITY: usize = 10;

/// Linear undo/redo history of full-frame snapshots.
///
/// The cursor points at the snapshot currently displayed. Checkpointing after an
/// undo discards the redo branch; once more than `capacity` snapshots exist the
/// oldest is evicted.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<Snapshot>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(FULL_HISTORY_CAPACITY)
    }
}

impl HistoryManager {
    /// Creates an empty history holding at most `capacity` snapshots (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.max(1)),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Records the buffer as the new current state.
    pub fn checkpoint(&mut self, buffer: &PixelBuffer) {
        self.push(buffer.snapshot());
    }

    /// Records an existing snapshot as the new current state.
    pub fn push(&mut self, snapshot: Snapshot) {
        if let Some(cursor) = self.cursor {
            let discarded = self.entries.len() - (cursor + 1);
            if discarded > 0 {
                log::debug!("Discarding {} redo entries", discarded);
            }
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = Some(self.entries.len() - 1);
        log::debug!(
            "Checkpoint {}/{}",
            self.entries.len(),
            self.capacity
        );
    }

    /// Steps back one entry, returning the snapshot to display.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        Some(self.entries[cursor].clone())
    }

    /// Steps forward one entry, returning the snapshot to display.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let cursor = self.cursor.filter(|&c| c + 1 < self.entries.len())? + 1;
        self.cursor = Some(cursor);
        Some(self.entries[cursor].clone())
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.map(|c| &self.entries[c])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Cursor position, `None` when the history is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Memory held by all snapshots, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.entries.iter().map(|s| s.pixels().len()).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
