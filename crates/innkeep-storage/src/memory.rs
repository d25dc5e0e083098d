//! In-memory storage, shared between clones.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{StorageBackend, StorageError, validate_key};

/// A map of keys to strings behind an `Arc<Mutex<_>>`.
///
/// Clones share the same map, so a test can hand one clone to the hotel
/// service and inspect what it wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `value` under `key`.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = HashMap::new();
        map.insert(key.into(), value.into());
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
