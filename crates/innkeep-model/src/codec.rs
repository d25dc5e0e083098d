//! Codec trait and the JSON implementation for the persisted document.
//!
//! Storage backends hold strings keyed by name, the same contract as a
//! browser's local storage. A [`DocumentCodec`] converts between those
//! strings and typed values. The storage layer is generic over the codec,
//! so tests can swap in a codec that fails on purpose.

use serde::{Serialize, de::DeserializeOwned};

use crate::ModelError;

/// Converts values to and from their stored string form.
///
/// `Send + Sync + 'static` because the codec lives inside the hotel actor
/// task for the whole life of the service.
pub trait DocumentCodec: Send + Sync + 'static {
    /// Serializes a value into its stored form.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ModelError>;

    /// Parses a stored string back into a value.
    fn decode<T: DeserializeOwned>(&self, raw: &str) -> Result<T, ModelError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`DocumentCodec`] backed by `serde_json`.
///
/// Compact by default. `JsonCodec::pretty()` indents the output, which is
/// what you want for files a person may open (exports, a storage directory
/// under version control).
///
/// ```rust
/// use innkeep_model::{DocumentCodec, HotelData, JsonCodec};
///
/// let codec = JsonCodec::default();
/// let raw = codec.encode(&HotelData::default()).unwrap();
/// let back: HotelData = codec.decode(&raw).unwrap();
/// assert_eq!(back, HotelData::default());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// A codec that writes indented JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DocumentCodec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ModelError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.map_err(ModelError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, raw: &str) -> Result<T, ModelError> {
        serde_json::from_str(raw).map_err(ModelError::Decode)
    }
}
