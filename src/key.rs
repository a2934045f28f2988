//! Keys and the keyboard reader.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Bytes, Read, Stdin};
use std::str::from_utf8;

/// The set of keys recognized by the editor.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    None,
    Control(u8),
    Char(char),
    Delete,
    Up,
    Down,
    Right,
    Left,
    Home,
    End,
}

pub const CTRL_A: Key = Key::Control(1);
pub const CTRL_C: Key = Key::Control(3);
pub const CTRL_E: Key = Key::Control(5);
pub const BACKSPACE: Key = Key::Control(8);
pub const TAB: Key = Key::Control(9);
pub const ENTER: Key = Key::Control(13);
pub const CTRL_Q: Key = Key::Control(17);
pub const CTRL_R: Key = Key::Control(18);
pub const ESC: Key = Key::Control(27);

impl Key {
    /// Returns `true` if the key erases the character left of the cursor.
    pub fn is_backspace(&self) -> bool {
        matches!(*self, BACKSPACE | Key::Delete)
    }

    /// Returns `true` if the key moves the cursor without editing.
    pub fn is_movement(&self) -> bool {
        matches!(
            *self,
            Key::Up | Key::Down | Key::Left | Key::Right | Key::Home | Key::End | CTRL_A | CTRL_E
        )
    }

    /// Returns the character this key inserts in INSERT mode, if any.
    pub fn as_char(&self) -> Option<char> {
        match *self {
            Key::Char(c) => Some(c),
            ENTER => Some('\n'),
            TAB => Some('\t'),
            _ => None,
        }
    }
}

/// Map of key names to [`Key`]s.
pub type KeyMap = HashMap<&'static str, Key>;

/// Key names that may be used in bindings, beyond single characters.
const KEY_NAMES: [(&str, Key); 13] = [
    ("ESC", ESC),
    ("ret", ENTER),
    ("tab", TAB),
    ("del", Key::Delete),
    ("bs", BACKSPACE),
    ("space", Key::Char(' ')),
    ("colon", Key::Char(':')),
    ("up", Key::Up),
    ("down", Key::Down),
    ("left", Key::Left),
    ("right", Key::Right),
    ("home", Key::Home),
    ("end", Key::End),
];

/// Returns a map of key names to keys, including `C-a` through `C-z`.
pub fn init_key_map() -> KeyMap {
    let mut key_map = KeyMap::new();
    for (name, key) in KEY_NAMES {
        key_map.insert(name, key);
    }
    for (n, name) in CONTROL_NAMES.into_iter().enumerate() {
        key_map.insert(name, Key::Control(n as u8 + 1));
    }
    key_map
}

const CONTROL_NAMES: [&str; 26] = [
    "C-a", "C-b", "C-c", "C-d", "C-e", "C-f", "C-g", "C-h", "C-i", "C-j", "C-k", "C-l", "C-m",
    "C-n", "C-o", "C-p", "C-q", "C-r", "C-s", "C-t", "C-u", "C-v", "C-w", "C-x", "C-y", "C-z",
];

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Key::None => write!(f, ""),
            ESC => write!(f, "ESC"),
            ENTER => write!(f, "ret"),
            TAB => write!(f, "tab"),
            BACKSPACE => write!(f, "bs"),
            Key::Control(b @ 1..=26) => write!(f, "C-{}", (b'a' + b - 1) as char),
            Key::Control(b) => write!(f, "C-{b}"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Delete => write!(f, "del"),
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Right => write!(f, "right"),
            Key::Left => write!(f, "left"),
            Key::Home => write!(f, "home"),
            Key::End => write!(f, "end"),
        }
    }
}

/// Converts text into the keys that would type it, mapping `'\n'` to Enter and
/// `'\t'` to Tab.
pub fn keys(text: &str) -> Vec<Key> {
    text.chars()
        .map(|c| match c {
            '\n' => ENTER,
            '\t' => TAB,
            c => Key::Char(c),
        })
        .collect()
}

/// A keyboard that reads bytes from the terminal and produces corresponding [`Key`]s.
pub struct Keyboard<R = Stdin> {
    term: Bytes<R>,
    pushback: Option<u8>,
    eof: bool,
}

impl Keyboard {
    pub fn new() -> Keyboard {
        Keyboard::with_reader(io::stdin())
    }
}

impl<R: Read> Keyboard<R> {
    /// Returns a keyboard reading bytes from `reader`.
    pub fn with_reader(reader: R) -> Keyboard<R> {
        Keyboard {
            term: reader.bytes(),
            pushback: None,
            eof: false,
        }
    }

    /// Returns `true` if the most recent read found no more bytes.
    ///
    /// For a terminal in raw mode this also happens when the read times out.
    pub fn at_eof(&self) -> bool {
        self.eof
    }

    fn next(&mut self) -> Result<Option<u8>> {
        if let Some(b) = self.pushback.take() {
            self.eof = false;
            return Ok(Some(b));
        }
        let b = self.term.next().transpose()?;
        self.eof = b.is_none();
        Ok(b)
    }

    /// Reads the next key.
    ///
    /// Returns [`Key::None`] when no bytes arrive before the terminal read timeout, or
    /// when a sequence is unrecognized or malformed. Input is assumed to be `UTF-8`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if an I/O error occurred while reading from the terminal.
    pub fn read(&mut self) -> Result<Key> {
        let key = match self.next()? {
            Some(27) => self.read_escape()?,
            Some(b @ 0..=31) => Key::Control(b),
            Some(b @ 32..=126) => Key::Char(b as char),
            Some(127) => Key::Delete,
            Some(b) => self.read_unicode(b)?,
            None => Key::None,
        };
        Ok(key)
    }

    /// Reads a sequence prefixed with `ESC`, which yields `ESC` itself when no `[` or
    /// `O` follows. Any other byte is kept for the next read.
    fn read_escape(&mut self) -> Result<Key> {
        match self.next()? {
            Some(b'[') | Some(b'O') => self.read_ansi(),
            Some(b) => {
                self.pushback = Some(b);
                Ok(ESC)
            }
            None => Ok(ESC),
        }
    }

    /// Reads the remainder of `ESC [` or `ESC O`, skipping any numeric parameters.
    fn read_ansi(&mut self) -> Result<Key> {
        let mut code: u32 = 0;
        loop {
            match self.next()? {
                Some(b @ b'0'..=b'9') => {
                    code = code.saturating_mul(10).saturating_add((b - b'0') as u32)
                }
                Some(b';') => (),
                Some(b'~') => return Ok(map_vt(code)),
                Some(b) => return Ok(map_xterm(b)),
                None => return Ok(Key::None),
            }
        }
    }

    /// Reads a `UTF-8` sequence of 2-4 bytes whose first byte is `b`.
    fn read_unicode(&mut self, b: u8) -> Result<Key> {
        let n = b.leading_ones() as usize;
        let key = if n < 2 || n > 4 {
            Key::None
        } else {
            let mut buf = [0; 4];
            buf[0] = b;
            for slot in buf.iter_mut().take(n).skip(1) {
                match self.next()? {
                    Some(b) => *slot = b,
                    None => return Ok(Key::None),
                }
            }
            let bytes = &buf[..n];
            match from_utf8(bytes)
                .map_err(|e| Error::utf8(bytes, e))?
                .chars()
                .next()
            {
                Some(c) => Key::Char(c),
                None => Key::None,
            }
        };
        Ok(key)
    }
}

fn map_vt(code: u32) -> Key {
    match code {
        1 | 7 => Key::Home,
        3 => Key::Delete,
        4 | 8 => Key::End,
        _ => Key::None,
    }
}

fn map_xterm(b: u8) -> Key {
    match b {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'F' => Key::End,
        b'H' => Key::Home,
        _ => Key::None,
    }
}
