//! Published editor state.
//!
//! The editor records which fields changed while handling a key. The host reads
//! and clears that set after every key and publishes one [`Event`] per field.

use serde::Serialize;
use serde_json::Value;

/// A piece of editor state visible to the remote display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Buffer,
    Mode,
    Command,
    Filename,
    Saved,
    Err,
    Status,
    Modal,
    Completions,
    Font,
    Fontsize,
    Rot,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Buffer,
        Field::Mode,
        Field::Command,
        Field::Filename,
        Field::Saved,
        Field::Err,
        Field::Status,
        Field::Modal,
        Field::Completions,
        Field::Font,
        Field::Fontsize,
        Field::Rot,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// A set of [`Field`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Changes(u16);

impl Changes {
    pub fn new() -> Changes {
        Changes(0)
    }

    pub fn all() -> Changes {
        Field::ALL
            .iter()
            .fold(Changes::new(), |changes, field| changes.with(*field))
    }

    pub fn with(mut self, field: Field) -> Changes {
        self.insert(field);
        self
    }

    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the current set and leaves this one empty.
    pub fn take(&mut self) -> Changes {
        std::mem::take(self)
    }

    /// Returns the fields in the set, in publication order.
    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(move |field| self.contains(*field))
    }
}

/// A single state publication, serialized as `{"event": field, "data": value}`.
#[derive(Debug, Serialize)]
pub struct Event {
    pub event: Field,
    pub data: Value,
}

impl Event {
    pub fn new(event: Field, data: Value) -> Event {
        Event { event, data }
    }
}
