//! Document store implementations.
//!
//! The core treats persistence as a narrow collaborator: whole JSON
//! documents loaded and saved by key. `FileStore` is the production
//! implementation; `MemoryStore` is the in-memory fake every test runs
//! against.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StorageError;

/// Pluggable persistence collaborator: whole-document load/save by key.
pub trait Store {
    /// Load the document bytes, or `None` if it was never saved.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the document. Must be all-or-nothing: a failed save leaves
    /// the previous document readable.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<T: Store + ?Sized> Store for std::sync::Arc<T> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, bytes)
    }
}

/// One JSON file per document under a base directory. Saves go through a
/// temp file and an atomic rename so a crash mid-write cannot corrupt the
/// previous version.
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Open a store rooted at the default data directory.
    pub fn open() -> Result<Self, StorageError> {
        let base = super::data_dir().map_err(|e| StorageError::LoadFailed {
            key: "<data_dir>".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(base))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl Store for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read(&path)
            .map(Some)
            .map_err(|e| StorageError::LoadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = self.base.join(format!("{key}.json.tmp"));
        let write = || -> std::io::Result<()> {
            std::fs::create_dir_all(&self.base)?;
            std::fs::write(&tmp, bytes)?;
            std::fs::rename(&tmp, &path)
        };
        write().map_err(|e| StorageError::SaveFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

/// HashMap-backed fake for tests, with a switch to inject save failures.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Vec<u8>>>,
    fail_saves: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail with a `SaveFailed` error.
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.documents.lock().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if *self.fail_saves.lock().unwrap() {
            return Err(StorageError::SaveFailed {
                key: key.to_string(),
                message: "injected failure".to_string(),
            });
        }
        self.documents
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load("account").unwrap().is_none());
        store.save("account", b"{}").unwrap();
        assert_eq!(store.load("account").unwrap().unwrap(), b"{}");
    }

    #[test]
    fn test_memory_store_injected_failure() {
        let store = MemoryStore::new();
        store.save("account", b"v1").unwrap();
        store.fail_saves(true);
        assert!(store.save("account", b"v2").is_err());
        // Previous document untouched.
        assert_eq!(store.load("account").unwrap().unwrap(), b"v1");
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.load("rituals").unwrap().is_none());
        store.save("rituals", b"[1,2,3]").unwrap();
        assert_eq!(store.load("rituals").unwrap().unwrap(), b"[1,2,3]");
    }

    #[test]
    fn test_file_store_overwrite_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save("logs", b"first version, longer").unwrap();
        store.save("logs", b"second").unwrap();
        assert_eq!(store.load("logs").unwrap().unwrap(), b"second");
        // No temp file left behind.
        assert!(!dir.path().join("logs.json.tmp").exists());
    }
}
