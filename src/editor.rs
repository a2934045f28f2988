//! Editor.
//!
//! An [`Editor`] owns every piece of document and display state. The host feeds it
//! keys, one at a time, and after each key publishes the fields reported by
//! [`Editor::take_changes`].

use crate::analyze::{Analyzer, NullAnalyzer};
use crate::bind::Bindings;
use crate::buffer::Buffer;
use crate::clip::Register;
use crate::cursor::Cursor;
use crate::dispatch;
use crate::ex::{self, Font};
use crate::history::{self, History};
use crate::key::{self, Key};
use crate::mode::Mode;
use crate::render::{self, MarkdownRenderer, Renderer};
use crate::state::{Changes, Event, Field};
use crate::storage::Storage;
use serde_json::{Value, json};
use tracing::debug;

/// Name of a document that has never been saved or loaded.
pub const UNNAMED: &str = "unnamed";

/// A request the editor makes of its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Stop reading keys and exit.
    Quit,

    /// Shut the device down.
    PowerOff,
}

/// Document state set aside while the help document is shown.
pub(crate) struct Stash {
    pub buffer: Buffer,
    pub cursor: Cursor,
    pub history: History,
    pub filename: String,
    pub saved: bool,
}

/// Candidate document names offered while completing an `:e` command.
pub(crate) struct Completions {
    pub names: Vec<String>,
    pub selected: Option<usize>,
}

impl Completions {
    /// Returns the name that completion settles on, if any.
    pub fn chosen(&self) -> Option<&str> {
        match self.selected {
            Some(i) => self.names.get(i).map(|name| name.as_str()),
            None if self.names.len() == 1 => Some(self.names[0].as_str()),
            None => None,
        }
    }
}

pub struct Editor {
    pub(crate) buffer: Buffer,
    pub(crate) cursor: Cursor,
    pub(crate) history: History,
    pub(crate) mode: Mode,

    /// Keys accumulated in normal mode that have not yet resolved.
    pub(crate) pending: Vec<Key>,

    pub(crate) register: Register,
    pub(crate) filename: String,
    pub(crate) saved: bool,
    pub(crate) err: Option<String>,
    pub(crate) status: Option<String>,

    /// Lines overlaid on the display until the next key.
    pub(crate) modal: Option<Vec<String>>,

    pub(crate) completions: Option<Completions>,
    pub(crate) font: Font,
    pub(crate) font_size: u32,
    pub(crate) rotated: bool,

    /// Viewport override as `(lines, shift)`.
    pub(crate) viz: Option<(usize, usize)>,

    /// The document displaced by help, if help is showing.
    pub(crate) help: Option<Stash>,

    pub(crate) changes: Changes,
    pub(crate) bindings: Bindings,
    pub(crate) storage: Box<dyn Storage>,
    pub(crate) analyzer: Box<dyn Analyzer>,
    renderer: Box<dyn Renderer>,
}

impl Editor {
    /// Creates an editor with an empty, unnamed document backed by `storage`.
    ///
    /// Everything else takes its default value and can be replaced with the
    /// `with_*` methods before the first key is dispatched.
    pub fn new(storage: Box<dyn Storage>) -> Editor {
        Editor {
            buffer: Buffer::new(),
            cursor: Cursor::default(),
            history: History::new(history::DEFAULT_DEPTH),
            mode: Mode::Normal,
            pending: Vec::new(),
            register: Register::default(),
            filename: UNNAMED.to_string(),
            saved: true,
            err: None,
            status: None,
            modal: None,
            completions: None,
            font: Font::default(),
            font_size: 50,
            rotated: false,
            viz: None,
            help: None,
            changes: Changes::all(),
            bindings: Bindings::new(),
            storage,
            analyzer: Box::new(NullAnalyzer),
            renderer: Box::new(MarkdownRenderer::new()),
        }
    }

    pub fn with_bindings(mut self, bindings: Bindings) -> Editor {
        self.bindings = bindings;
        self
    }

    /// Replaces the history with an empty one retaining at most `depth` snapshots.
    pub fn with_undo_depth(mut self, depth: usize) -> Editor {
        self.history = History::with_base(depth, self.buffer.clone());
        self
    }

    pub fn with_register(mut self, register: Register) -> Editor {
        self.register = register;
        self
    }

    pub fn with_analyzer(mut self, analyzer: Box<dyn Analyzer>) -> Editor {
        self.analyzer = analyzer;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Editor {
        self.renderer = renderer;
        self
    }

    pub fn with_display(mut self, font: Font, font_size: u32, rotated: bool) -> Editor {
        self.font = font;
        self.font_size = font_size.clamp(1, ex::MAX_FONT_SIZE);
        self.rotated = rotated;
        self
    }

    /// Loads the document `name` from storage, replacing the current document
    /// regardless of unsaved changes.
    pub fn open(&mut self, name: &str) {
        dispatch::load_document(self, name);
    }

    /// Processes a single key and returns the action, if any, requested of the host.
    pub fn dispatch(&mut self, key: Key) -> Option<Action> {
        if key == Key::None {
            return None;
        }
        self.changes.insert(Field::Buffer);

        if key == key::CTRL_C {
            return Some(Action::Quit);
        }
        if self.modal.take().is_some() {
            self.changes.insert(Field::Modal);
            return None;
        }
        if key == key::CTRL_Q {
            self.changes = Changes::all();
            return None;
        }
        if key.is_movement() && (self.mode == Mode::Insert || self.pending.is_empty()) {
            self.move_cursor(key);
            return None;
        }
        match self.mode {
            Mode::Insert => {
                self.dispatch_insert(key);
                None
            }
            Mode::Normal => {
                self.pending.push(key);
                self.changes.insert(Field::Command);
                dispatch::dispatch_command(self)
            }
        }
    }

    /// Dispatches each of `keys` in order, returning the first action requested.
    pub fn send(&mut self, keys: &[Key]) -> Option<Action> {
        let mut action = None;
        for key in keys {
            let a = self.dispatch(*key);
            if action.is_none() {
                action = a;
            }
        }
        action
    }

    fn dispatch_insert(&mut self, key: Key) {
        if key == key::ESC {
            self.cursor.move_column(-1);
            self.buffer.clip(&mut self.cursor);
            self.cursor.anchor();
            self.history.commit(&self.buffer);
            self.set_mode(Mode::Normal);
        } else if key.is_backspace() {
            self.buffer.delete(&mut self.cursor);
            self.set_saved(false);
        } else if let Some(c) = key.as_char() {
            self.buffer.insert(c, &mut self.cursor);
            self.set_saved(false);
        } else {
            debug!(%key, "ignored in insert mode");
        }
    }

    fn move_cursor(&mut self, key: Key) {
        let row = self.cursor.line;
        match key {
            Key::Up => self.cursor.move_line(-1),
            Key::Down => self.cursor.move_line(1),
            Key::Left => self.cursor.move_column(-1),
            Key::Right => self.cursor.move_column(1),
            key::CTRL_A | Key::Home => self.cursor.set_to(row, 0),
            key::CTRL_E | Key::End => self.cursor.set_to(row, self.buffer.line_len(row)),
            _ => return,
        }
        self.buffer.clip(&mut self.cursor);
        if !matches!(key, Key::Up | Key::Down) {
            self.cursor.anchor();
        }
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.changes.insert(Field::Mode);
        }
    }

    pub(crate) fn set_saved(&mut self, saved: bool) {
        if self.saved != saved {
            self.saved = saved;
            self.changes.insert(Field::Saved);
        }
    }

    pub(crate) fn set_status<S: Into<String>>(&mut self, status: S) {
        self.status = Some(status.into());
        self.changes.insert(Field::Status);
    }

    pub(crate) fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.changes.insert(Field::Status);
        }
    }

    pub(crate) fn set_err(&mut self, err: Option<String>) {
        if self.err != err {
            self.err = err;
            self.changes.insert(Field::Err);
        }
    }

    pub(crate) fn set_filename(&mut self, name: &str) {
        if self.filename != name {
            self.filename = name.to_string();
            self.changes.insert(Field::Filename);
        }
    }

    pub(crate) fn set_completions(&mut self, completions: Option<Completions>) {
        if self.completions.is_some() || completions.is_some() {
            self.completions = completions;
            self.changes.insert(Field::Completions);
        }
    }

    /// Returns the rendered window of the buffer around the cursor, with the caret
    /// marked.
    pub fn get(&self) -> Vec<String> {
        let mut lines = self.buffer.to_strings();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = self.cursor.line.min(lines.len() - 1);
        lines[row] = mark_caret(&lines[row], self.cursor.column, self.mode);
        let (start, focus) = render::viewport(row, self.viz, self.font_size, self.rotated);
        self.renderer.render(&lines[start..], Some(focus))
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the printable keys of the pending command.
    pub fn command(&self) -> String {
        self.pending
            .iter()
            .filter_map(|key| match key {
                Key::Char(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn pending(&self) -> &[Key] {
        &self.pending
    }

    pub fn register(&self) -> &str {
        self.register.get()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn saved(&self) -> bool {
        self.saved
    }

    pub fn err(&self) -> Option<&str> {
        self.err.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn modal(&self) -> Option<&[String]> {
        self.modal.as_deref()
    }

    /// Returns the completion candidates and the selected index, if completing.
    pub fn completions(&self) -> Option<(&[String], Option<usize>)> {
        self.completions
            .as_ref()
            .map(|c| (c.names.as_slice(), c.selected))
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn rotated(&self) -> bool {
        self.rotated
    }

    pub fn viz(&self) -> Option<(usize, usize)> {
        self.viz
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn is_help(&self) -> bool {
        self.help.is_some()
    }

    pub fn changes(&self) -> Changes {
        self.changes
    }

    /// Returns the fields changed since the last call and resets the set.
    pub fn take_changes(&mut self) -> Changes {
        self.changes.take()
    }

    /// Returns events for the fields changed since the last call.
    pub fn events(&mut self) -> Vec<Event> {
        let changes = self.take_changes();
        changes
            .iter()
            .map(|field| Event::new(field, self.field_value(field)))
            .collect()
    }

    /// Returns the published value of `field`.
    pub fn field_value(&self, field: Field) -> Value {
        match field {
            Field::Buffer => json!(self.get()),
            Field::Mode => json!(self.mode),
            Field::Command => json!(self.command()),
            Field::Filename => json!(self.filename),
            Field::Saved => json!(self.saved),
            Field::Err => json!(self.err),
            Field::Status => json!(self.status),
            Field::Modal => json!(self.modal),
            Field::Completions => json!(self.completions_markup()),
            Field::Font => json!(self.font),
            Field::Fontsize => json!(self.font_size),
            Field::Rot => json!(if self.rotated { "90" } else { "0" }),
        }
    }

    /// Renders the completion candidates as a single line with the selection
    /// highlighted.
    fn completions_markup(&self) -> Option<Vec<String>> {
        self.completions.as_ref().map(|c| {
            let line = c
                .names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    if Some(i) == c.selected {
                        format!("::{name}::")
                    } else {
                        name.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            self.renderer.render(&[line], None)
        })
    }
}

/// Wraps the character before `col` in a caret span, or a space at column `0`.
fn mark_caret(line: &str, col: usize, mode: Mode) -> String {
    let class = match mode {
        Mode::Insert => "ins",
        Mode::Normal => "normal",
    };
    let (start, letter, end) = if col == 0 {
        (String::new(), ' ', line.to_string())
    } else {
        let start = line.chars().take(col - 1).collect::<String>();
        let letter = line.chars().nth(col - 1).unwrap_or(' ');
        let end = line.chars().skip(col).collect::<String>();
        (start, letter, end)
    };
    format!(r#"{start}<span id="caret" class="{class}">{letter}</span>{end}"#)
}
