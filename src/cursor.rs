//! Cursor position.

/// A position in a [`Buffer`](crate::buffer::Buffer).
///
/// A cursor performs no bounds checks on its own; the buffer clips it. Horizontal and
/// absolute moves remember the column so vertical moves across shorter lines can
/// restore it later.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
    sticky: Option<usize>,
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Cursor {
        Cursor {
            line,
            column,
            sticky: None,
        }
    }

    /// Moves to an absolute position.
    pub fn set_to(&mut self, line: usize, column: usize) {
        self.line = line;
        self.column = column;
        self.sticky = Some(column);
    }

    /// Moves `delta` columns, saturating at column `0`.
    pub fn move_column(&mut self, delta: isize) {
        self.column = self.column.saturating_add_signed(delta);
        self.sticky = Some(self.column);
    }

    /// Moves `delta` lines, saturating at line `0`, and restores the remembered
    /// column.
    pub fn move_line(&mut self, delta: isize) {
        self.line = self.line.saturating_add_signed(delta);
        if let Some(col) = self.sticky {
            self.column = col;
        }
    }

    /// Forgets any remembered column in favor of the current one.
    pub fn anchor(&mut self) {
        self.sticky = Some(self.column);
    }
}

impl PartialEq<(usize, usize)> for Cursor {
    fn eq(&self, other: &(usize, usize)) -> bool {
        (self.line, self.column) == *other
    }
}
