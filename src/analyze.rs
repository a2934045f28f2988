//! Text analysis.

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use std::fmt::{self, Display, Formatter};

/// A problem reported by a linter.
#[derive(Clone, Debug, PartialEq)]
pub struct Lint {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Display for Lint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line + 1, self.column + 1, self.message)
    }
}

/// A named readability score.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
    pub name: String,
    pub value: f64,
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.1}", self.name, self.value)
    }
}

/// Analyzes document text on request.
///
/// Failures are reported to the user and never abort editing.
pub trait Analyzer {
    /// Returns the number of words and paragraphs in `text`.
    fn count(&self, text: &str) -> (usize, usize) {
        let counts = Buffer::from_text(text).counts();
        (counts.words, counts.paragraphs)
    }

    fn lint(&self, text: &str) -> Result<Vec<Lint>>;

    fn readability(&self, text: &str) -> Result<Vec<Score>>;
}

/// An analyzer that only counts.
pub struct NullAnalyzer;

impl Analyzer for NullAnalyzer {
    fn lint(&self, _: &str) -> Result<Vec<Lint>> {
        Err(Error::analyzer("linting not available"))
    }

    fn readability(&self, _: &str) -> Result<Vec<Score>> {
        Err(Error::analyzer("readability scoring not available"))
    }
}
