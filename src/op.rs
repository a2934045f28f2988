//! Normal-mode operations.
//!
//! Each operation has a canonical name used when binding keys from configuration.
//! Composite operations are expanded into primitives by the dispatcher, see
//! [`dispatch`](crate::dispatch).

use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    InsertBefore,
    InsertAfter,
    InsertStart,
    InsertEnd,
    OpenBelow,
    Undo,
    Redo,
    PasteAfter,
    PasteBefore,
    DeleteLine,
    DeleteAroundWord,
    DeleteInsideWord,
    DeleteToEnd,
    ChangeAroundWord,
    ChangeInsideWord,
    ChangeToEnd,
    CloseHelp,
}

/// Map of operation names to [`Op`]s, in definition order.
pub type OpMap = IndexMap<&'static str, Op>;

static OPS: [(&str, Op, &str); 17] = [
    ("insert-before", Op::InsertBefore, "insert before the cursor"),
    ("insert-after", Op::InsertAfter, "insert after the cursor"),
    ("insert-start", Op::InsertStart, "insert at the start of the line"),
    ("insert-end", Op::InsertEnd, "insert at the end of the line"),
    ("open-below", Op::OpenBelow, "open a new line below"),
    ("undo", Op::Undo, "undo"),
    ("redo", Op::Redo, "redo"),
    ("paste-after", Op::PasteAfter, "paste after the cursor"),
    ("paste-before", Op::PasteBefore, "paste before the cursor"),
    ("delete-line", Op::DeleteLine, "delete the line"),
    ("delete-around-word", Op::DeleteAroundWord, "delete around word"),
    ("delete-inside-word", Op::DeleteInsideWord, "delete inside word"),
    ("delete-to-end", Op::DeleteToEnd, "delete to the end of the line"),
    ("change-around-word", Op::ChangeAroundWord, "change around word"),
    ("change-inside-word", Op::ChangeInsideWord, "change inside word"),
    ("change-to-end", Op::ChangeToEnd, "change to the end of the line"),
    ("close-help", Op::CloseHelp, "close help"),
];

pub fn init_op_map() -> OpMap {
    OPS.iter().map(|(name, op, _)| (*name, *op)).collect()
}

impl Op {
    pub fn name(&self) -> &'static str {
        self.lookup().0
    }

    pub fn description(&self) -> &'static str {
        self.lookup().2
    }

    fn lookup(&self) -> &'static (&'static str, Op, &'static str) {
        // every variant appears in OPS
        let i = OPS.iter().position(|(_, op, _)| op == self).unwrap_or(0);
        &OPS[i]
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
