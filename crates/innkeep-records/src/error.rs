//! Error types for the record registry.

/// Errors returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A required field is blank or a number is out of range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The record to update or delete does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A value that must be unique (room number, username) is taken.
    #[error("duplicate {0}")]
    Duplicate(String),

    /// The acting user is not an admin.
    #[error("{user} is not allowed to {action}")]
    PermissionDenied { user: String, action: &'static str },
}

impl RecordError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
