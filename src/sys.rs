//! # System functions
//!
//! Convenience wrappers over common filesystem and environment operations, with an
//! opinionated stance on how to interpret errors.
use std::env;
use std::path::{Path, PathBuf};

pub trait AsString {
    fn as_string(&self) -> String;
}

impl AsString for PathBuf {
    fn as_string(&self) -> String {
        self.display().to_string()
    }
}

impl AsString for Path {
    fn as_string(&self) -> String {
        self.display().to_string()
    }
}

/// Returns the `HOME` path as derived from the environment, or `"."` if `HOME` is
/// not set.
pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns a lexicographically-sorted list of the names of regular files contained
/// in `dir`, quietly discarding any I/O errors when reading the directory.
pub fn list_files<P: AsRef<Path>>(dir: P) -> Vec<String> {
    let mut names: Vec<String> = match dir.as_ref().read_dir() {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect(),
        Err(_) => vec![],
    };
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn list_files_sorted_without_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b"), "").unwrap();
        fs::write(dir.path().join("a"), "").unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();
        assert_eq!(list_files(dir.path()), vec!["a", "b"]);
    }

    #[test]
    fn list_missing_dir() {
        assert!(list_files("/definitely/not/here").is_empty());
    }
}
