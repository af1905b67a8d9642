//! Browser-style key-value storage.
//!
//! The persisted cart lives in a per-context string key-value store - the
//! `localStorage` seam. Views never touch the store directly; they go
//! through [`crate::cart::CartRepository`], which owns the key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Errors from the storage backend.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// The backend rejected or failed the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// A string key-value store scoped to one browser-like context.
///
/// Writes are last-writer-wins with no merging: the design assumes a single
/// active writer per key (one page at a time). A stale overwrite from a
/// second concurrent page is an accepted limitation of the store, not a
/// condition any caller detects or repairs.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`KeyValueStore`].
///
/// Clones share the underlying map, so two views constructed over clones of
/// the same `MemoryStore` model two pages loaded in one browser context.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}
