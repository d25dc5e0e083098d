//! Error types for the model layer.

/// Errors that can occur while encoding or decoding the hotel document.
///
/// Every variant wraps the original `serde_json::Error` so the caller can
/// see exactly which field failed to parse.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Serialization failed (turning the document into a string).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning a stored string into a document).
    ///
    /// Common causes: a truncated write, a hand-edited file, or an
    /// enum value this version does not know about.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
