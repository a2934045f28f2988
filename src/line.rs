//! A single line of text.
//!
//! Columns are character indices rather than byte offsets, so a column always
//! names a position between two characters. A line never contains `'\n'`; line
//! structure is owned by [`Buffer`](crate::buffer::Buffer).

use crate::etc;
use std::fmt::{self, Display, Formatter};

/// Separator recognized by word objects.
const WORD_SEP: char = ' ';

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    contents: String,
}

/// The outcome of extracting a word object: the remaining line, the extracted text
/// and the column where the cursor should land.
pub type Extraction = (Line, String, usize);

impl Line {
    pub fn new() -> Line {
        Line::default()
    }

    pub fn as_str(&self) -> &str {
        &self.contents
    }

    /// Returns the number of characters in the line.
    pub fn len(&self) -> usize {
        self.contents.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Returns the text left of `col`.
    pub fn head(&self, col: usize) -> &str {
        &self.contents[..self.offset(col)]
    }

    /// Returns the text at and right of `col`.
    pub fn tail(&self, col: usize) -> &str {
        &self.contents[self.offset(col)..]
    }

    /// Inserts `c` at `col`, returning `false` if `col` lies beyond the end of the
    /// line or `c` would break the line.
    pub fn insert(&mut self, col: usize, c: char) -> bool {
        if col > self.len() || c == '\n' {
            false
        } else {
            let offset = self.offset(col);
            self.contents.insert(offset, c);
            true
        }
    }

    /// Removes the character left of `col`.
    pub fn delete(&mut self, col: usize) -> Option<char> {
        if col == 0 || col > self.len() {
            None
        } else {
            let offset = self.offset(col - 1);
            Some(self.contents.remove(offset))
        }
    }

    /// Appends the contents of `other`.
    pub fn append(&mut self, other: &Line) {
        self.contents.push_str(&other.contents);
    }

    /// Truncates the line at `col` and returns the removed tail.
    pub fn split_off(&mut self, col: usize) -> Line {
        let offset = self.offset(col);
        Line {
            contents: self.contents.split_off(offset),
        }
    }

    /// Returns the leading whitespace of the line.
    pub fn indentation(&self) -> &str {
        let rest = self.contents.trim_start();
        &self.contents[..self.contents.len() - rest.len()]
    }

    /// Removes the word under `col`, bounded by the nearest separators on either
    /// side, which are left in place.
    pub fn extract_inside_word(&self, col: usize) -> Extraction {
        let lin = self.as_str();
        let end = etc::find_char(lin, WORD_SEP, col);
        let start = etc::rfind_char(lin, WORD_SEP, col);
        match (start, end) {
            (None, None) => (Line::new(), String::new(), 0),
            (Some(start), None) => (
                Line::from(self.head(start + 1)),
                self.tail(start + 1).to_string(),
                start + 1,
            ),
            (None, Some(end)) => (Line::from(self.tail(end)), self.head(end).to_string(), 0),
            (Some(start), Some(end)) => (
                Line::from(format!("{}{}", self.head(start + 1), self.tail(end)).as_str()),
                self.slice(start + 1, end),
                start + 1,
            ),
        }
    }

    /// Removes the word under `col` together with one adjacent separator, the one
    /// after the word when present, otherwise the one before it.
    pub fn extract_around_word(&self, col: usize) -> Extraction {
        let lin = self.as_str();
        let end = etc::find_char(lin, WORD_SEP, col);
        let start = etc::rfind_char(lin, WORD_SEP, col);
        match (start, end) {
            (None, None) => (Line::new(), lin.to_string(), 0),
            (Some(start), None) => (
                Line::from(self.head(start)),
                self.tail(start).to_string(),
                start + 1,
            ),
            (None, Some(end)) => (
                Line::from(self.tail(end + 1)),
                self.head(end + 1).to_string(),
                0,
            ),
            (Some(start), Some(end)) => (
                Line::from(format!("{}{}", self.head(start), self.tail(end)).as_str()),
                self.slice(start + 1, end + 1),
                start + 1,
            ),
        }
    }

    fn slice(&self, from: usize, to: usize) -> String {
        self.contents
            .chars()
            .skip(from)
            .take(to.saturating_sub(from))
            .collect()
    }

    fn offset(&self, col: usize) -> usize {
        etc::pos_to_offset(&self.contents, col)
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Line {
        debug_assert!(!text.contains('\n'), "line cannot contain newline");
        Line {
            contents: text.to_string(),
        }
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.contents)
    }
}

impl PartialEq<str> for Line {
    fn eq(&self, other: &str) -> bool {
        self.contents == other
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.contents == *other
    }
}
