//! Key bindings.
use crate::error::{Error, Result};
use crate::key::{self, ESC, Key, KeyMap};
use crate::op::{self, Op, OpMap};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Map of [`Key`] sequences to operations.
type BindMap = IndexMap<Vec<Key>, Op>;

/// Set of [`Key`] sequence prefixes.
type Prefixes = HashSet<Vec<Key>>;

/// A prefix-free mapping of normal-mode [`Key`] sequences to operations.
///
/// No bound sequence is a proper prefix of another, so a pending sequence either
/// matches exactly, is still a prefix, or can never match.
pub struct Bindings {
    key_map: KeyMap,
    op_map: OpMap,
    bind_map: BindMap,
    bind_prefixes: Prefixes,
}

/// Result of looking up a pending key sequence.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    Bound(Op),
    Prefix,
    Unbound,
}

impl Bindings {
    /// Creates the default key bindings.
    pub fn new() -> Bindings {
        let mut this = Bindings {
            key_map: key::init_key_map(),
            op_map: op::init_op_map(),
            bind_map: BindMap::new(),
            bind_prefixes: Prefixes::new(),
        };

        for (key_seq, op) in Self::DEFAULT_BINDINGS {
            this.bind(key_seq, op).unwrap_or_else(|e| panic!("{e}"));
        }
        this
    }

    /// Creates the default key bindings and applies `overrides` in order.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] on the first override that [`bind`](Self::bind) rejects.
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Bindings>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut this = Bindings::new();
        for (key_seq, op) in overrides {
            this.bind(key_seq, op)?;
        }
        Ok(this)
    }

    /// Binds the key sequence `key_seq` to the operation named `op`.
    ///
    /// Key names in `key_seq` are separated by `:`, such as `d:a:w`. A successful
    /// bind overrides an existing binding with an identical key sequence.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a key or the operation is unknown, if the sequence
    /// contains a key reserved by the editor, or if the sequence would shadow or be
    /// shadowed by another binding.
    pub fn bind(&mut self, key_seq: &str, op: &str) -> Result<()> {
        let keys = self.to_keys(key_seq)?;
        let op = *self.op_map.get(op).ok_or_else(|| Error::invalid_op(op))?;
        if Self::is_restricted(&keys) {
            return Err(Error::restricted_key(key_seq));
        }
        if !self.bind_map.contains_key(&keys)
            && (self.bind_prefixes.contains(&keys)
                || (1..keys.len()).any(|n| self.bind_map.contains_key(&keys[..n])))
        {
            return Err(Error::conflicting_key(key_seq));
        }

        for n in 1..keys.len() {
            self.bind_prefixes.insert(keys[..n].to_vec());
        }
        self.bind_map.insert(keys, op);
        Ok(())
    }

    /// Converts the key sequence `key_seq` to a vector of [`Key`]s.
    fn to_keys(&self, key_seq: &str) -> Result<Vec<Key>> {
        if key_seq.is_empty() {
            return Err(Error::invalid_key(key_seq));
        }
        key_seq
            .split(':')
            .map(|name| {
                self.key_map
                    .get(name)
                    .copied()
                    .or_else(|| {
                        let mut chars = name.chars();
                        if let (Some(c), None) = (chars.next(), chars.next()) {
                            Some(Key::Char(c))
                        } else {
                            None
                        }
                    })
                    .ok_or_else(|| Error::invalid_key(name))
            })
            .collect()
    }

    fn is_restricted(keys: &[Key]) -> bool {
        keys.first() == Some(&Key::Char(':'))
            || keys
                .iter()
                .any(|key| *key == ESC || key.is_backspace() || key.is_movement())
    }

    /// Resolves the pending key sequence `keys`.
    pub fn lookup(&self, keys: &[Key]) -> Lookup {
        if let Some(op) = self.bind_map.get(keys) {
            Lookup::Bound(*op)
        } else if self.bind_prefixes.contains(keys) {
            Lookup::Prefix
        } else {
            Lookup::Unbound
        }
    }

    /// Returns the operation bound to `keys`, otherwise `None`.
    pub fn find(&self, keys: &[Key]) -> Option<Op> {
        self.bind_map.get(keys).copied()
    }

    /// Returns `true` if `keys` is a proper prefix of at least one bound sequence.
    pub fn is_prefix(&self, keys: &[Key]) -> bool {
        self.bind_prefixes.contains(keys)
    }

    /// Returns an iterator over bindings in the order they were first bound.
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<Key>, &Op)> {
        self.bind_map.iter()
    }

    /// Formats `keys` the way sequences are written in configuration.
    pub fn format_keys(keys: &[Key]) -> String {
        keys.iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Default mapping of keys to operations.
    const DEFAULT_BINDINGS: [(&'static str, &'static str); 17] = [
        // --- entering insert mode ---
        ("i", "insert-before"),
        ("a", "insert-after"),
        ("I", "insert-start"),
        ("A", "insert-end"),
        ("o", "open-below"),
        // --- history ---
        ("u", "undo"),
        ("C-r", "redo"),
        // --- register ---
        ("p", "paste-after"),
        ("P", "paste-before"),
        // --- deletion and change ---
        ("d:d", "delete-line"),
        ("d:a:w", "delete-around-word"),
        ("d:i:w", "delete-inside-word"),
        ("d:$", "delete-to-end"),
        ("c:a:w", "change-around-word"),
        ("c:i:w", "change-inside-word"),
        ("c:$", "change-to-end"),
        // --- help ---
        ("q", "close-help"),
    ];
}

impl Default for Bindings {
    fn default() -> Bindings {
        Bindings::new()
    }
}
