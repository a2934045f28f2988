//! Undo and redo history.

use crate::buffer::Buffer;
use tracing::debug;

/// Default number of snapshots retained.
pub const DEFAULT_DEPTH: usize = 10;

/// A bounded, linear sequence of buffer snapshots with a pointer to the current one.
///
/// Committing after an undo overwrites the snapshot following the pointer and
/// discards everything beyond it, so there is never more than one redo path.
#[derive(Debug)]
pub struct History {
    snapshots: Vec<Buffer>,
    pointer: usize,
    depth: usize,
}

impl History {
    /// Creates a history of at most `depth` snapshots whose only snapshot is an
    /// empty buffer.
    pub fn new(depth: usize) -> History {
        History::with_base(depth, Buffer::new())
    }

    /// Creates a history whose only snapshot is `base`.
    pub fn with_base(depth: usize, base: Buffer) -> History {
        History {
            snapshots: vec![base],
            pointer: 0,
            depth: depth.max(1),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Records `buffer` as the snapshot following the current one.
    pub fn commit(&mut self, buffer: &Buffer) {
        let next = self.pointer + 1;
        if next >= self.snapshots.len() {
            self.snapshots.push(buffer.clone());
        } else {
            self.snapshots[next] = buffer.clone();
            self.snapshots.truncate(next + 1);
        }
        self.pointer = next;
        if self.snapshots.len() > self.depth {
            let excess = self.snapshots.len() - self.depth;
            self.snapshots.drain(..excess);
            self.pointer -= excess;
        }
        debug!(pointer = self.pointer, len = self.snapshots.len(), "history commit");
    }

    /// Steps back one snapshot and returns it, or `None` if already at the oldest.
    pub fn undo(&mut self) -> Option<Buffer> {
        if self.pointer > 0 {
            self.pointer -= 1;
            debug!(pointer = self.pointer, "history undo");
            Some(self.current())
        } else {
            None
        }
    }

    /// Steps forward one snapshot and returns it, or `None` if already at the newest.
    pub fn redo(&mut self) -> Option<Buffer> {
        if self.pointer + 1 < self.snapshots.len() {
            self.pointer += 1;
            debug!(pointer = self.pointer, "history redo");
            Some(self.current())
        } else {
            None
        }
    }

    /// Returns a copy of the snapshot at the pointer.
    pub fn current(&self) -> Buffer {
        self.snapshots[self.pointer].clone()
    }
}

impl Default for History {
    fn default() -> History {
        History::new(DEFAULT_DEPTH)
    }
}
