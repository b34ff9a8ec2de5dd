//! Error types for the session layer.

use mudforge_protocol::ProtocolError;
use mudforge_transport::ConnectionId;

/// Errors that can occur during session management.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No live player for this connection. Usually a line that raced a
    /// disconnect.
    #[error("no player for connection {0}")]
    UnknownConnection(ConnectionId),

    /// The player already chose a name; naming happens once.
    #[error("connection {0} is already named")]
    AlreadyNamed(ConnectionId),

    /// The player has not chosen a name yet, so has no room.
    #[error("connection {0} has not chosen a name yet")]
    NotNamed(ConnectionId),

    /// A blank name was proposed.
    #[error("player name must not be empty")]
    EmptyName,

    /// The player registry could not be read or written.
    #[error("player registry persistence failed: {0}")]
    Persistence(#[from] ProtocolError),
}
