//! Snapshot persistence adapters.
//!
//! Client-side state is a convenience cache, not a system of record. An
//! adapter only has to hold one JSON string per fixed key; callers decide
//! what to do when it can't.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

/// Errors raised by snapshot adapters.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying storage failed (disk full, permissions, missing directory).
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// State could not be encoded as JSON.
    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Storage is not usable at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage for JSON-encoded state snapshots.
///
/// Keys are fixed identifiers such as `"cart"` and `"wishlist"`; values
/// are whole snapshots, replaced on every save.
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage exists but cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Replace the snapshot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, key: &str, json: &str) -> Result<(), PersistError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for std::sync::Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, json: &str) -> Result<(), PersistError> {
        (**self).save(key, json)
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Process-local snapshot store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PersistError::Unavailable("memory store lock poisoned".to_owned()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, json: &str) -> Result<(), PersistError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PersistError::Unavailable("memory store lock poisoned".to_owned()))?;
        entries.insert(key.to_owned(), json.to_owned());
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// Snapshot store backed by one `<key>.json` file per key.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the snapshot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, json: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load("cart").unwrap().is_none());

        store.save("cart", "[]").unwrap();
        assert_eq!(store.load("cart").unwrap().as_deref(), Some("[]"));

        store.save("cart", "[1]").unwrap();
        assert_eq!(store.load("cart").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state"));
        assert!(store.load("wishlist").unwrap().is_none());
    }

    #[test]
    fn test_file_store_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("state"));

        store.save("cart", r#"{"items":[]}"#).unwrap();
        store.save("cart", r#"{"items":[1]}"#).unwrap();

        assert_eq!(
            store.load("cart").unwrap().as_deref(),
            Some(r#"{"items":[1]}"#)
        );
        assert!(store.dir().join("cart.json").exists());
        assert!(!store.dir().join(".cart.json.tmp").exists());
    }

    #[test]
    fn test_file_store_save_fails_when_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store = FileStore::new(&blocker);
        assert!(matches!(store.save("cart", "{}"), Err(PersistError::Io(_))));
    }
}
