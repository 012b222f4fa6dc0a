//! File-backed key-value store.
//!
//! All keys live in one JSON object on disk. A missing, empty or corrupt file
//! reads as an empty store and is replaced by the next write. Writes go to a
//! uniquely named temp file in the same directory which is then persisted
//! over the store file, so a crash mid-write leaves the previous contents
//! intact and concurrent writers race last-writer-wins.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bazaar_core::KeyValueStore;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors from [`FileStore`].
#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode store: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// A [`KeyValueStore`] persisted to a single JSON file.
///
/// Every call re-reads the file; the mutex only serializes read-modify-write
/// within this process.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Use `path` as the backing file. Nothing is touched until first use.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, FileStoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(FileStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&text) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "store is not a JSON object of strings; treating as empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), FileStoreError> {
        let write_error = |source| FileStoreError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(write_error)?;
                parent
            }
            None => Path::new("."),
        };

        let text = serde_json::to_string_pretty(map).map_err(FileStoreError::Encode)?;
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_error)?;
        tmp.write_all(text.as_bytes()).map_err(write_error)?;
        tmp.persist(&self.path).map_err(|e| write_error(e.error))?;
        tracing::debug!(path = %self.path.display(), keys = map.len(), "store written");
        Ok(())
    }

    fn modify(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), FileStoreError> {
        let _guard = self.lock.lock().map_err(|_| FileStoreError::Poisoned)?;
        let mut map = self.read_map()?;
        if change(&mut map) {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    type Error = FileStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let _guard = self.lock.lock().map_err(|_| FileStoreError::Poisoned)?;
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.modify(|map| {
            map.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.modify(|map| map.remove(key).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json"));
        assert_eq!(store.get("cart").unwrap(), None);
        // Removing from an empty store does not create the file.
        store.remove("cart").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/store.json");

        FileStore::open(&path).set("cart", "[]").unwrap();
        FileStore::open(&path).set("theme", "dark").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        // Only the store file is left behind.
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["store.json"]);
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json"));
        store.set("cart", "[1]").unwrap();
        store.set("other", "x").unwrap();

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(FileStore::open(&path).get("cart").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"cart": [{"id": "hp-envy", "quantity": 1}]}"#).unwrap();
        let store = FileStore::open(&path);

        assert_eq!(store.get("cart").unwrap(), None);
        store.set("cart", "[]").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({"cart": "[]"}));
    }

    #[test]
    fn test_concurrent_writers_do_not_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        std::thread::scope(|scope| {
            for writer in 0..4 {
                let path = &path;
                scope.spawn(move || {
                    // Separate handles, like separate processes.
                    let store = FileStore::open(path);
                    for i in 0..25 {
                        store.set("cart", &format!("[{writer},{i}]")).unwrap();
                    }
                });
            }
        });

        assert!(FileStore::open(&path).get("cart").unwrap().is_some());
    }
}
