//! Normal-mode command dispatch.
//!
//! Keys accumulate in the editor's pending command until they resolve. Before the
//! binding table is consulted, the following rules apply in order:
//!
//! * `ESC` abandons the pending command
//! * backspace removes itself and the key before it
//! * movement keys are rejected and removed
//! * a leading `:` starts a colon command, which runs on `ret`
//!
//! Composite operations expand into a short sequence of primitive operations and
//! replayed keys rather than being implemented directly.

use crate::bind::Lookup;
use crate::buffer::Buffer;
use crate::editor::{Action, Completions, Editor, Stash};
use crate::ex::{self, Command};
use crate::help;
use crate::history::History;
use crate::key::{self, Key};
use crate::line::Line;
use crate::mode::Mode;
use crate::op::Op;
use crate::state::Field;
use std::mem;
use tracing::{debug, info, warn};

/// A step of an expanded operation.
enum Step {
    Op(Op),
    Keys(Vec<Key>),
}

/// Resolves the pending command after a key was appended to it.
pub(crate) fn dispatch_command(ed: &mut Editor) -> Option<Action> {
    let last = *ed.pending.last()?;

    if last == key::ESC {
        clear_pending(ed);
        return None;
    }
    if last.is_backspace() {
        let n = ed.pending.len().saturating_sub(2);
        ed.pending.truncate(n);
        ed.set_completions(None);
        return None;
    }
    if last.is_movement() {
        ed.pending.pop();
        ed.set_status("Movement is not available while a command is pending");
        return None;
    }
    if ed.pending.first() == Some(&Key::Char(':')) {
        return dispatch_ex(ed, last);
    }

    match ed.bindings.lookup(&ed.pending) {
        Lookup::Bound(op) => {
            debug!(%op, "dispatch");
            clear_pending(ed);
            run(ed, op);
        }
        Lookup::Prefix => (),
        Lookup::Unbound => {
            debug!(command = %ed.command(), "unbound");
            clear_pending(ed);
        }
    }
    None
}

fn clear_pending(ed: &mut Editor) {
    ed.pending.clear();
    ed.set_completions(None);
    ed.clear_status();
}

fn run(ed: &mut Editor, op: Op) {
    match expand(op, ed.register.get()) {
        Some(steps) => {
            for step in steps {
                match step {
                    Step::Op(op) => primitive(ed, op),
                    Step::Keys(keys) => {
                        ed.send(&keys);
                    }
                }
            }
        }
        None => primitive(ed, op),
    }
}

/// Returns the steps of a composite operation, or `None` if `op` is primitive.
fn expand(op: Op, yank: &str) -> Option<Vec<Step>> {
    let steps = match op {
        Op::ChangeAroundWord => {
            vec![Step::Op(Op::DeleteAroundWord), Step::Op(Op::InsertAfter)]
        }
        Op::ChangeInsideWord => {
            vec![Step::Op(Op::DeleteInsideWord), Step::Op(Op::InsertAfter)]
        }
        Op::ChangeToEnd => vec![Step::Op(Op::DeleteToEnd), Step::Op(Op::InsertAfter)],
        Op::PasteAfter => vec![
            Step::Op(Op::InsertAfter),
            Step::Keys(key::keys(yank)),
            Step::Keys(vec![key::ESC]),
        ],
        Op::PasteBefore => vec![
            Step::Op(Op::InsertBefore),
            Step::Keys(key::keys(yank)),
            Step::Keys(vec![key::ESC]),
        ],
        _ => return None,
    };
    Some(steps)
}

fn primitive(ed: &mut Editor, op: Op) {
    let row = ed.cursor.line;
    match op {
        Op::InsertBefore => {
            ed.cursor.move_column(-1);
            ed.buffer.clip(&mut ed.cursor);
            ed.set_mode(Mode::Insert);
        }
        Op::InsertAfter => {
            ed.buffer.clip(&mut ed.cursor);
            ed.set_mode(Mode::Insert);
        }
        Op::InsertStart => {
            ed.cursor.set_to(row, 0);
            ed.set_mode(Mode::Insert);
        }
        Op::InsertEnd => {
            ed.cursor.set_to(row, ed.buffer.line_len(row));
            ed.set_mode(Mode::Insert);
        }
        Op::OpenBelow => {
            ed.buffer.insert_line(row + 1, Line::new());
            ed.cursor.set_to(row + 1, 0);
            ed.set_saved(false);
            ed.set_mode(Mode::Insert);
        }
        Op::Undo => {
            ed.buffer = match ed.history.undo() {
                Some(buffer) => buffer,
                None => {
                    ed.set_status("No further undo information");
                    ed.history.current()
                }
            };
            ed.buffer.clip(&mut ed.cursor);
            ed.set_saved(false);
        }
        Op::Redo => {
            ed.buffer = match ed.history.redo() {
                Some(buffer) => buffer,
                None => {
                    ed.set_status("No further redo information");
                    ed.history.current()
                }
            };
            ed.buffer.clip(&mut ed.cursor);
            ed.set_saved(false);
        }
        Op::DeleteLine => {
            if let Some(line) = ed.buffer.remove_line(row) {
                ed.register.set(format!("{line}\n"));
            }
            if ed.buffer.is_empty() {
                ed.buffer = Buffer::new();
            }
            ed.buffer.clip(&mut ed.cursor);
            ed.set_saved(false);
        }
        Op::DeleteAroundWord | Op::DeleteInsideWord => {
            let Some(line) = ed.buffer.line(row) else {
                return;
            };
            let (line, word, col) = if op == Op::DeleteAroundWord {
                line.extract_around_word(ed.cursor.column)
            } else {
                line.extract_inside_word(ed.cursor.column)
            };
            ed.register.set(word);
            ed.buffer.replace_line(row, line);
            ed.cursor.column = col;
            ed.buffer.clip(&mut ed.cursor);
            ed.cursor.anchor();
            ed.set_saved(false);
        }
        Op::DeleteToEnd => {
            let Some(line) = ed.buffer.line(row) else {
                return;
            };
            let col = ed.cursor.column;
            let tail = line.tail(col).to_string();
            let head = Line::from(line.head(col));
            ed.register.set(tail);
            ed.buffer.replace_line(row, head);
            ed.buffer.clip(&mut ed.cursor);
            ed.set_saved(false);
        }
        Op::CloseHelp => close_help(ed),
        Op::ChangeAroundWord
        | Op::ChangeInsideWord
        | Op::ChangeToEnd
        | Op::PasteAfter
        | Op::PasteBefore => run(ed, op),
    }
}

/// Handles a key appended to a colon command.
fn dispatch_ex(ed: &mut Editor, last: Key) -> Option<Action> {
    if last == key::TAB {
        ed.pending.pop();
        complete(ed);
        None
    } else if last == key::ENTER {
        let text = ed.command().chars().skip(1).collect::<String>();
        let chosen = ed
            .completions
            .as_ref()
            .and_then(|c| c.chosen())
            .map(|name| name.to_string());
        clear_pending(ed);
        match ex::parse_command(&text) {
            Ok(command) => execute(ed, command, chosen),
            Err(e) => {
                ed.set_status(e.to_string());
                None
            }
        }
    } else {
        ed.set_completions(None);
        None
    }
}

/// Lists document names matching the partial name of an `:e` command, or selects
/// the next name if already listed.
fn complete(ed: &mut Editor) {
    let text = ed.command().chars().skip(1).collect::<String>();
    let Some(prefix) = ex::completion_prefix(&text) else {
        return;
    };
    let completions = match ed.completions.take() {
        Some(Completions { names, selected }) => {
            let selected = selected.map_or(0, |i| (i + 1) % names.len());
            Some(Completions {
                names,
                selected: Some(selected),
            })
        }
        None => {
            let names = ed.storage.complete(prefix);
            debug!(prefix, count = names.len(), "completions");
            if names.is_empty() {
                None
            } else {
                Some(Completions {
                    names,
                    selected: None,
                })
            }
        }
    };
    ed.completions = completions;
    ed.changes.insert(Field::Completions);
}

fn execute(ed: &mut Editor, command: Command, chosen: Option<String>) -> Option<Action> {
    debug!(?command, "execute");
    match command {
        Command::Write(name) => {
            let name = name.unwrap_or_else(|| ed.filename.clone());
            save_document(ed, &name);
        }
        Command::Edit { name, force } => {
            if !force && !ed.saved {
                ed.set_status("You have unsaved changes");
            } else {
                let name = chosen.unwrap_or(name);
                load_document(ed, &name);
            }
        }
        Command::Quit { force } => {
            let stashed_unsaved = ed.help.as_ref().is_some_and(|stash| !stash.saved);
            if force || (ed.saved && !stashed_unsaved) {
                info!("power off requested");
                ed.set_status("Shutting down");
                return Some(Action::PowerOff);
            } else {
                ed.set_status("You have unsaved changes");
            }
        }
        Command::Help => open_help(ed),
        Command::Rotate => {
            ed.rotated = !ed.rotated;
            ed.changes.insert(Field::Rot);
        }
        Command::Font(font) => {
            ed.font = font;
            ed.changes.insert(Field::Font);
        }
        Command::FontSize(size) => {
            ed.font_size = size;
            ed.changes.insert(Field::Fontsize);
            ed.set_status(format!("Set font size to {size}"));
        }
        Command::Viz(viz) => {
            ed.viz = viz;
            match viz {
                Some((lines, shift)) => ed.set_status(format!("Setting shift to {lines}:{shift}")),
                None => ed.set_status("Clearing custom viz"),
            }
        }
        Command::Count => {
            let (words, paragraphs) = ed.analyzer.count(&ed.buffer.to_text());
            ed.set_status(format!("{words} words, {paragraphs} paragraphs"));
        }
        Command::Lint => match ed.analyzer.lint(&ed.buffer.counts().text) {
            Ok(lints) if lints.is_empty() => ed.set_status("No lint found"),
            Ok(lints) => show_modal(ed, lints.iter().map(|lint| lint.to_string()).collect()),
            Err(e) => {
                warn!("lint: {e}");
                ed.set_status(e.to_string());
            }
        },
        Command::Readability => match ed.analyzer.readability(&ed.buffer.counts().text) {
            Ok(scores) => show_modal(ed, scores.iter().map(|score| score.to_string()).collect()),
            Err(e) => {
                warn!("readability: {e}");
                ed.set_status(e.to_string());
            }
        },
        Command::Unknown(text) => debug!(text, "unknown command"),
    }
    None
}

fn show_modal(ed: &mut Editor, lines: Vec<String>) {
    ed.modal = Some(lines);
    ed.changes.insert(Field::Modal);
}

fn save_document(ed: &mut Editor, name: &str) {
    match ed.storage.save(name, &ed.buffer.to_strings()) {
        Ok(()) => {
            info!(name, "saved");
            ed.set_filename(name);
            ed.set_saved(true);
            ed.set_err(None);
            ed.set_status(format!("Saved as {name}"));
        }
        Err(e) => {
            warn!(name, "save failed: {e}");
            ed.set_err(Some(e.to_string()));
        }
    }
}

/// Replaces the current document with `name` from storage.
///
/// The history starts over with the loaded document as its only snapshot. On
/// failure the current document and cursor are kept and the error recorded.
pub(crate) fn load_document(ed: &mut Editor, name: &str) {
    match ed.storage.load(name) {
        Ok(lines) => {
            info!(name, lines = lines.len(), "loaded");
            ed.buffer = Buffer::from_text(&lines.join("\n"));
            ed.history = History::with_base(ed.history.depth(), ed.buffer.clone());
            ed.set_filename(name);
            ed.set_saved(true);
            ed.set_err(None);
            ed.set_status(format!("Loaded {name}"));
            ed.cursor.set_to(0, 0);
        }
        Err(e) => {
            warn!(name, "load failed: {e}");
            ed.set_err(Some(e.to_string()));
        }
    }
}

/// Sets the current document aside and shows help in its place.
fn open_help(ed: &mut Editor) {
    if ed.help.is_none() {
        let buffer = help::help_buffer(&ed.bindings);
        let history = History::with_base(ed.history.depth(), buffer.clone());
        ed.help = Some(Stash {
            buffer: mem::replace(&mut ed.buffer, buffer),
            cursor: ed.cursor,
            history: mem::replace(&mut ed.history, history),
            filename: ed.filename.clone(),
            saved: ed.saved,
        });
        ed.cursor.set_to(0, 0);
        ed.set_filename(help::HELP_NAME);
        ed.set_saved(true);
    }
    ed.set_status("Press q to return");
}

/// Restores the document set aside by [`open_help`], if any.
fn close_help(ed: &mut Editor) {
    if let Some(stash) = ed.help.take() {
        ed.buffer = stash.buffer;
        ed.cursor = stash.cursor;
        ed.history = stash.history;
        ed.set_filename(&stash.filename);
        ed.set_saved(stash.saved);
        ed.buffer.clip(&mut ed.cursor);
    }
}
