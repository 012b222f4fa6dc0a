//! Key-value persistence interface.
//!
//! The cart is stored as one serialized string under one key. Anything that
//! can get and set strings by key can back it: a browser's local storage, a
//! JSON file on disk, or the [`MemoryStore`] used in tests.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

/// A string key-value store.
///
/// All methods take `&self`; implementations use interior mutability so a
/// store can be shared behind a plain reference.
pub trait KeyValueStore: Debug {
    /// The error type returned by the backend.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Insert or replace a value.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove a value by key.
    ///
    /// Returns `Ok(())` even if the key did not exist.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove(key)
    }
}

/// Error from [`MemoryStore`]; only raised when a writer panicked while
/// holding the lock.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("memory store lock poisoned")]
pub struct MemoryStoreError;

/// In-process store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a single entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl KeyValueStore for MemoryStore {
    type Error = MemoryStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let entries = self.entries.read().map_err(|_| MemoryStoreError)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut entries = self.entries.write().map_err(|_| MemoryStoreError)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let mut entries = self.entries.write().map_err(|_| MemoryStoreError)?;
        entries.remove(key);
        Ok(())
    }
}
