//! Codec trait and implementations for snapshot (de)serialization.
//!
//! The stores don't care HOW a snapshot becomes bytes, only that something
//! implements [`Codec`]. [`JsonCodec`] is the one we ship: snapshots stay
//! human-readable and hand-editable, which is what a world builder wants.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the decoded value owns
/// its data, so the input buffer can be dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that writes pretty-printed JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use mudforge_protocol::{Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let mut rooms = BTreeMap::new();
/// rooms.insert("Taverna".to_string(), 1u32);
///
/// let bytes = codec.encode(&rooms).unwrap();
/// let decoded: BTreeMap<String, u32> = codec.decode(&bytes).unwrap();
/// assert_eq!(rooms, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec_pretty(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
