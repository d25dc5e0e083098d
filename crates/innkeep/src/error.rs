//! Unified error type for Innkeep.

use innkeep_records::RecordError;
use innkeep_rooms::RoomError;
use innkeep_storage::StorageError;

use crate::ConfigError;

/// Top-level error that wraps every crate-specific error.
///
/// Callers of the hotel service deal with this one type; `?` converts the
/// sub-crate errors through the `#[from]` impls.
#[derive(Debug, thiserror::Error)]
pub enum HotelError {
    /// A lifecycle action was rejected (validation, conflict, not found).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A registry operation was rejected.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Reading, writing, encoding, or decoding the stored document failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The configuration file is unreadable or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The hotel actor has stopped.
    #[error("hotel service is not running")]
    Unavailable,
}
