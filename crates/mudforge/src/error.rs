//! Unified error type for Mudforge.

use mudforge_protocol::ProtocolError;
use mudforge_session::SessionError;
use mudforge_transport::TransportError;
use mudforge_world::WorldError;

/// Top-level error that wraps all crate-specific errors.
///
/// Only startup can fail with it: binding the listener and loading the
/// snapshots. Once the loop runs, errors become replies to players.
#[derive(Debug, thiserror::Error)]
pub enum MudError {
    /// Binding or accepting failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Encoding, decoding or storage I/O failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The world snapshot could not be loaded or seeded.
    #[error(transparent)]
    World(#[from] WorldError),

    /// The player registry could not be loaded.
    #[error(transparent)]
    Session(#[from] SessionError),
}
