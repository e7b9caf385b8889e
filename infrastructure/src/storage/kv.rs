//! String-keyed file storage.
//!
//! One file per key under a single directory. This is the persistence
//! substrate for both the conversation history and the small preference
//! values; the typed adapters sit on top of it.

use arnica_application::StoreError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Key/value store mapping each key to a file in `dir`.
///
/// Reads fail soft: any I/O error loads as an absent key. Writes report
/// [`StoreError`] so callers can warn the user; last writer wins, there is
/// no locking across processes.
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Arc<Self>, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StoreError::WriteFailed(format!("{}: {e}", dir.display())))?;
        Ok(Arc::new(Self { dir }))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "could not read storage file");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| StoreError::WriteFailed(format!("{}: {e}", path.display())))
    }

    pub fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(key, error = %e, "could not remove storage file");
            }
        } else {
            debug!(key, "removed storage key");
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn remove_deletes_key_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        store.set("session-token", "tok").unwrap();
        store.remove("session-token");
        assert_eq!(store.get("session-token"), None);
        // Removing again is harmless
        store.remove("session-token");
    }

    #[test]
    fn open_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileKvStore::open(&nested).unwrap();
        store.set("k", "v").unwrap();
        assert!(nested.join("k").exists());
    }
}
