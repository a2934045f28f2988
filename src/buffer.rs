//! Line buffer.

use crate::cursor::Cursor;
use crate::line::Line;

/// An ordered sequence of [`Line`]s.
///
/// A buffer always contains at least one line, except transiently while the last
/// line is being removed. Cloning a buffer produces a deep copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<Line>,
}

/// Word and paragraph counts of a buffer, along with the text they were derived from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counts {
    pub words: usize,
    pub paragraphs: usize,
    pub text: String,
}

/// Markup characters ignored when counting words.
const MARKUP_CHARS: [char; 4] = ['*', '_', '#', ':'];

impl Buffer {
    /// Creates a buffer containing a single empty line.
    pub fn new() -> Buffer {
        Buffer {
            lines: vec![Line::new()],
        }
    }

    /// Creates a buffer from `text`, one line per `'\n'` separated segment.
    pub fn from_text(text: &str) -> Buffer {
        Buffer {
            lines: text.split('\n').map(Line::from).collect(),
        }
    }

    /// Returns the contents joined with `'\n'`.
    pub fn to_text(&self) -> String {
        self.to_strings().join("\n")
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.to_string()).collect()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// Returns the length of the line at `row`, or `0` if no such line exists.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|line| line.len()).unwrap_or(0)
    }

    /// Inserts `line` before `row`, appending when `row` equals the number of lines.
    pub fn insert_line(&mut self, row: usize, line: Line) {
        let row = row.min(self.lines.len());
        self.lines.insert(row, line);
    }

    /// Removes and returns the line at `row`.
    pub fn remove_line(&mut self, row: usize) -> Option<Line> {
        if row < self.lines.len() {
            Some(self.lines.remove(row))
        } else {
            None
        }
    }

    pub fn replace_line(&mut self, row: usize, line: Line) {
        if let Some(slot) = self.lines.get_mut(row) {
            *slot = line;
        }
    }

    /// Inserts `c` at `cursor` and advances it.
    ///
    /// A `'\n'` splits the line at the cursor and moves the cursor to the start of
    /// the new line. When nothing follows the cursor, the new line inherits the
    /// indentation of the split line and the cursor lands after it.
    pub fn insert(&mut self, c: char, cursor: &mut Cursor) {
        if cursor.line >= self.lines.len() {
            self.lines.push(Line::new());
            cursor.line = self.lines.len() - 1;
        }
        let row = cursor.line;
        if c == '\n' {
            let line = &mut self.lines[row];
            let tail = line.split_off(cursor.column);
            let indent = line.indentation().to_string();
            if tail.is_empty() && !indent.is_empty() {
                let col = indent.chars().count();
                self.lines.insert(row + 1, Line::from(indent.as_str()));
                cursor.set_to(row + 1, col);
            } else {
                self.lines.insert(row + 1, tail);
                cursor.set_to(row + 1, 0);
            }
        } else if self.lines[row].insert(cursor.column, c) {
            cursor.move_column(1);
        }
    }

    /// Erases the character left of `cursor`, joining with the previous line when the
    /// cursor is at column `0`. Does nothing at the very start of the buffer.
    pub fn delete(&mut self, cursor: &mut Cursor) {
        let row = cursor.line;
        if row >= self.lines.len() {
            return;
        }
        if cursor.column == 0 {
            if row > 0 {
                let line = self.lines.remove(row);
                let prev = &mut self.lines[row - 1];
                let col = prev.len();
                prev.append(&line);
                cursor.set_to(row - 1, col);
            }
        } else if self.lines[row].delete(cursor.column).is_some() {
            cursor.move_column(-1);
        }
    }

    /// Clamps `cursor` to an existing line and to a column within that line.
    pub fn clip(&self, cursor: &mut Cursor) {
        if cursor.line >= self.lines.len() {
            cursor.line = self.lines.len().saturating_sub(1);
        }
        let len = self.line_len(cursor.line);
        if cursor.column > len {
            cursor.column = len;
        }
    }

    /// Counts words and non-blank paragraphs.
    ///
    /// Lines are joined with single spaces and markup characters blanked before
    /// splitting on single spaces, so runs of spaces contribute empty words.
    pub fn counts(&self) -> Counts {
        let text = self
            .to_strings()
            .join(" ")
            .replace(MARKUP_CHARS, " ");
        let words = text.split(' ').count();
        let paragraphs = self
            .lines
            .iter()
            .filter(|line| !line.as_str().trim().is_empty())
            .count();
        Counts {
            words,
            paragraphs,
            text,
        }
    }
}

impl Default for Buffer {
    fn default() -> Buffer {
        Buffer::new()
    }
}
