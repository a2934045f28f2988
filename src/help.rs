//! A collection of functions related to help.

#![allow(unused_must_use, reason = "infallible calls to write!()")]

use crate::bind::Bindings;
use crate::buffer::Buffer;
use crate::etc;
use crate::key;
use crate::op;
use std::fmt::Write;

/// Name of the document shown by `:h`.
pub const HELP_NAME: &str = "help";

/// Returns a buffer containing general help followed by the active bindings, all
/// written as markdown.
pub fn help_buffer(bindings: &Bindings) -> Buffer {
    let mut text = String::new();
    write!(text, "{}", include_str!("include/help.md"));
    writeln!(text, "{}", etc::version());
    writeln!(text);
    writeln!(text, "## Bindings");
    for (key_seq, op) in bindings.iter() {
        let keys = Bindings::format_keys(key_seq);
        writeln!(text, "- `{keys}` {}", op.description());
    }
    Buffer::from_text(text.trim_end())
}

/// Returns a formatted list of bindings aligned for display on a terminal.
pub fn bindings_content(bindings: &Bindings) -> String {
    let bindings = bindings
        .iter()
        .map(|(key_seq, op)| (Bindings::format_keys(key_seq), *op))
        .collect::<Vec<_>>();
    let key_width = bindings
        .iter()
        .fold(0, |width, (k, _)| if k.len() > width { k.len() } else { width });

    let mut out = String::new();
    for (key_seq, op) in bindings {
        writeln!(out, "{key_seq:<key_width$}   {op}");
    }
    out
}

/// Returns a formatted list of key names that may appear in bindings.
pub fn keys_content() -> String {
    let mut names = key::init_key_map().into_keys().collect::<Vec<_>>();
    names.sort();
    let mut out = String::new();
    for name in names {
        writeln!(out, "{name}");
    }
    out
}

/// Returns a formatted list of operations with descriptions.
pub fn ops_content() -> String {
    let ops = op::init_op_map();
    let name_width = ops
        .keys()
        .fold(0, |width, name| if name.len() > width { name.len() } else { width });

    let mut out = String::new();
    for (name, op) in ops {
        writeln!(out, "{name:<name_width$}   {}", op.description());
    }
    out
}
