//! Transport abstraction layer for Mudforge.
//!
//! The game loop never touches sockets directly. It talks to a
//! [`Transport`], which reports three kinds of events once per tick
//! (new connections, disconnections, and parsed command lines) and
//! accepts outbound text lines addressed by [`ConnectionId`].
//!
//! # Feature Flags
//!
//! - `tcp` (default): line-oriented TCP transport via `tokio`

mod error;
mod line;
mod memory;
#[cfg(feature = "tcp")]
mod tcp;

pub use error::TransportError;
pub use line::{LineDecoder, MAX_LINE_LEN, split_command};
pub use memory::MemoryTransport;
#[cfg(feature = "tcp")]
pub use tcp::TcpLineTransport;

use std::fmt;

/// Opaque identifier for a connection.
///
/// Ids are handed out by the transport and never reused while the
/// transport is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A command line received from a connection, already split into its
/// first word and the rest of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    /// The connection that sent the line.
    pub id: ConnectionId,
    /// First whitespace-delimited word, case preserved.
    pub verb: String,
    /// Remainder of the line, trimmed. Empty when absent.
    pub args: String,
}

impl InboundCommand {
    /// Builds a command from a raw line. Returns `None` for blank lines.
    pub fn from_line(id: ConnectionId, line: &str) -> Option<Self> {
        let (verb, args) = split_command(line)?;
        Some(Self {
            id,
            verb: verb.to_string(),
            args: args.to_string(),
        })
    }
}

/// The capability the game loop consumes.
///
/// All `poll_*` methods drain: each event is reported exactly once.
/// Implementations must never block; the loop calls them from inside
/// a tick.
///
/// A tick polls in a fixed order: `poll_new_connections`, then
/// `poll_disconnected`, then `poll_commands`. `poll_new_connections`
/// starts the tick and takes in whatever arrived since the last one, so
/// a connection is always reported no later than its first line or its
/// disconnect.
pub trait Transport: Send + 'static {
    /// Connections accepted since the last tick.
    fn poll_new_connections(&mut self) -> Vec<ConnectionId>;

    /// Connections that went away since the last poll.
    fn poll_disconnected(&mut self) -> Vec<ConnectionId>;

    /// Command lines received since the last poll, in arrival order.
    fn poll_commands(&mut self) -> Vec<InboundCommand>;

    /// Queues a line of text for a connection.
    ///
    /// Sending to an unknown or already-closed connection is silently
    /// ignored; the disconnect surfaces on a later `poll_disconnected`.
    fn send(&mut self, id: ConnectionId, line: &str);
}
