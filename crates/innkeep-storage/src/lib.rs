//! Storage layer for Innkeep.
//!
//! The hotel document is persisted as a string under a single key, the
//! same contract a browser's local storage offers. [`StorageBackend`]
//! abstracts over where those strings live:
//!
//! - [`FileStorage`]: one `<key>.json` file per key in a directory,
//!   replaced atomically on every write
//! - [`MemoryStorage`]: a shared in-memory map, for tests and demos
//!
//! [`DocumentStore`] sits on top of a backend and a
//! [`DocumentCodec`](innkeep_model::DocumentCodec) and deals in typed
//! values instead of strings. It also writes the date-stamped export file.

mod error;
mod file;
mod memory;
mod store;

use std::future::Future;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use store::{DocumentStore, export_file_name};

/// String storage addressed by key.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static`: the backend is owned by the hotel actor task
///   for the life of the service.
/// - The returned futures are `Send` so the actor can be spawned on the
///   multi-threaded runtime.
pub trait StorageBackend: Send + Sync + 'static {
    /// Returns the value stored under `key`, or `None` if nothing is.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Stores `value` under `key`, replacing what was there.
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Returns `true` if `key` is usable as a storage key: non-empty ASCII
/// letters, digits, `-`, and `_`. Anything else could escape a storage
/// directory or produce odd file names.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
