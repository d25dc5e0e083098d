use std::path::PathBuf;

use innkeep_model::ModelError;

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A filesystem operation failed.
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored string could not be decoded, or a value could not be
    /// encoded.
    #[error(transparent)]
    Codec(#[from] ModelError),

    /// Nothing is stored under the key.
    #[error("nothing stored under key {0}")]
    Missing(String),

    /// The key contains characters that are not allowed.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the stored data exists but is not a valid
    /// document.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Codec(ModelError::Decode(_)))
    }
}
