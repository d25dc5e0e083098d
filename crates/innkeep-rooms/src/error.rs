//! Error types for the lifecycle engine.

use innkeep_model::{CleaningLogId, RoomId};

/// Errors returned by lifecycle actions.
///
/// A failed action never changes the document: the engine works on a copy
/// and only hands it back on success.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// Required input is missing or invalid, e.g. an empty guest name or a
    /// staff member who is not a cleaner.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The room is in a status that doesn't allow this action, e.g.
    /// checking out a room with no open booking.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The room does not exist.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// The cleaning log does not exist.
    #[error("cleaning log {0} not found")]
    LogNotFound(CleaningLogId),
}
