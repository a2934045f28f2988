//! Document persistence.
//!
//! Documents are addressed by name. Names are not checked for traversal outside of
//! the documents directory.

use crate::error::{Error, Result};
use crate::sys::{self, AsString};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads and writes named documents as sequences of lines.
pub trait Storage {
    /// Returns the lines of the document `name`.
    fn load(&self, name: &str) -> Result<Vec<String>>;

    /// Replaces the document `name` with `lines`.
    fn save(&mut self, name: &str, lines: &[String]) -> Result<()>;

    /// Returns the sorted names of documents starting with `prefix`.
    fn complete(&self, prefix: &str) -> Vec<String>;
}

/// Documents stored as files in a single directory.
pub struct DocsStorage {
    dir: PathBuf,
}

impl DocsStorage {
    /// Opens the documents directory `dir`, creating it if necessary.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<DocsStorage> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir.as_string(), e))?;
        info!(dir = %dir.display(), "documents directory");
        Ok(DocsStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for DocsStorage {
    fn load(&self, name: &str) -> Result<Vec<String>> {
        let path = self.dir.join(name);
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path.as_string(), e))?;
        Ok(text.split('\n').map(|line| line.to_string()).collect())
    }

    fn save(&mut self, name: &str, lines: &[String]) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, lines.join("\n")).map_err(|e| Error::io(&path.as_string(), e))
    }

    fn complete(&self, prefix: &str) -> Vec<String> {
        sys::list_files(&self.dir)
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect()
    }
}

/// Documents kept in memory for the lifetime of the storage.
#[derive(Default)]
pub struct MemoryStorage {
    docs: BTreeMap<String, Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    /// Adds the document `name` whose lines are those of `text`.
    pub fn with_doc(mut self, name: &str, text: &str) -> MemoryStorage {
        let lines = text.split('\n').map(|line| line.to_string()).collect();
        self.docs.insert(name.to_string(), lines);
        self
    }
}

impl Storage for MemoryStorage {
    fn load(&self, name: &str) -> Result<Vec<String>> {
        self.docs
            .get(name)
            .cloned()
            .ok_or_else(|| Error::io(name, io::Error::from(io::ErrorKind::NotFound)))
    }

    fn save(&mut self, name: &str, lines: &[String]) -> Result<()> {
        self.docs.insert(name.to_string(), lines.to_vec());
        Ok(())
    }

    fn complete(&self, prefix: &str) -> Vec<String> {
        self.docs
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }
}
