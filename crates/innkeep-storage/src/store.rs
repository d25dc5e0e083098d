//! Typed access to the persisted document.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use innkeep_model::{DocumentCodec, JsonCodec, STORAGE_KEY};
use serde::{Serialize, de::DeserializeOwned};

use crate::{StorageBackend, StorageError};

/// A backend, a codec, and the key the document lives under.
///
/// ```rust
/// use innkeep_model::HotelData;
/// use innkeep_storage::{DocumentStore, MemoryStorage};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = DocumentStore::new(MemoryStorage::new());
/// assert!(store.load::<HotelData>().await.unwrap().is_none());
///
/// store.save(&HotelData::default()).await.unwrap();
/// assert!(store.load::<HotelData>().await.unwrap().is_some());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct DocumentStore<B, C = JsonCodec> {
    backend: B,
    codec: C,
    key: String,
}

impl<B: StorageBackend> DocumentStore<B> {
    /// A store using compact JSON under [`STORAGE_KEY`].
    pub fn new(backend: B) -> Self {
        Self::with_codec(backend, JsonCodec::default(), STORAGE_KEY)
    }
}

impl<B: StorageBackend, C: DocumentCodec> DocumentStore<B, C> {
    pub fn with_codec(backend: B, codec: C, key: impl Into<String>) -> Self {
        Self {
            backend,
            codec,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads and decodes the document.
    ///
    /// Returns `Ok(None)` if nothing is stored. A stored value that does
    /// not decode is an error; check [`StorageError::is_corrupt`] to tell
    /// it apart from an I/O failure.
    pub async fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.read(&self.key).await? else {
            return Ok(None);
        };
        let value = self.codec.decode(&raw)?;
        Ok(Some(value))
    }

    /// Encodes and stores the document, replacing the previous one.
    pub async fn save<T: Serialize + Sync>(&self, value: &T) -> Result<(), StorageError> {
        let raw = self.codec.encode(value)?;
        self.backend.write(&self.key, &raw).await
    }

    /// Removes the stored document.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(&self.key).await
    }

    /// Copies the stored document, byte for byte, into `dir` as
    /// `hotel-data-backup-<date>.json`, and returns the file's path.
    ///
    /// # Errors
    /// [`StorageError::Missing`] if nothing has been stored yet.
    pub async fn export_to(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf, StorageError> {
        let raw = self
            .backend
            .read(&self.key)
            .await?
            .ok_or_else(|| StorageError::Missing(self.key.clone()))?;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| StorageError::io("create", dir, e))?;
        let path = dir.join(export_file_name(date));
        tokio::fs::write(&path, raw.as_bytes())
            .await
            .map_err(|e| StorageError::io("write", &path, e))?;

        tracing::info!(path = %path.display(), bytes = raw.len(), "document exported");
        Ok(path)
    }
}

/// The export file name for `date`, e.g. `hotel-data-backup-2024-05-01.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("hotel-data-backup-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;
    use innkeep_model::{HotelData, Room};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(date()), "hotel-data-backup-2024-05-01.json");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = DocumentStore::new(MemoryStorage::new());
        let mut data = HotelData::default();
        data.rooms.push(Room::new("101", 1, 2));

        store.save(&data).await.unwrap();
        let loaded: HotelData = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_flagged() {
        let store = DocumentStore::new(MemoryStorage::with_entry(STORAGE_KEY, "{ not json"));
        let err = store.load::<HotelData>().await.unwrap_err();
        assert!(err.is_corrupt());
    }

    #[tokio::test]
    async fn test_export_without_document_is_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(MemoryStorage::new());
        let err = store.export_to(tmp.path(), date()).await.unwrap_err();
        assert!(matches!(err, StorageError::Missing(key) if key == STORAGE_KEY));
    }

    #[tokio::test]
    async fn test_clear_removes_document() {
        let store = DocumentStore::new(MemoryStorage::new());
        store.save(&HotelData::default()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load::<HotelData>().await.unwrap().is_none());
    }
}
