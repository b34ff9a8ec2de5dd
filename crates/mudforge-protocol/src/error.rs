//! Error types for the protocol layer.
//!
//! Each crate in Mudforge defines its own error enum. A `ProtocolError`
//! always means a snapshot could not be encoded, decoded, read or written;
//! nothing here is caused by what a player typed.

/// Errors that can occur while encoding or storing snapshots.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Snapshots carry no schema version, so a format change shows up
    /// here as a decode failure.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Reading or writing the backing store failed.
    #[error("storage failed: {0}")]
    Storage(#[from] std::io::Error),
}
