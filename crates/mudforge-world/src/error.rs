//! Error types for the world layer.

use mudforge_protocol::ProtocolError;

/// Errors that can occur during world operations.
///
/// Everything except [`UnknownRoom`](Self::UnknownRoom) and
/// [`Persistence`](Self::Persistence) is caused by what a player typed and
/// leaves the world untouched.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The room does not exist. Callers only pass names they got from the
    /// world itself, so this is a logic bug when it shows up.
    #[error("room '{0}' does not exist")]
    UnknownRoom(String),

    /// The current room has no exit with that name.
    #[error("no exit '{0}' from this room")]
    UnknownExit(String),

    /// The exit is already there.
    #[error("room '{room}' already has an exit to '{exit}'")]
    ExitAlreadyExists { room: String, exit: String },

    /// `create` was given nothing to create.
    #[error("exit name must not be empty")]
    EmptyExitName,

    /// An exit from a room back into itself.
    #[error("room '{0}' cannot lead to itself")]
    SelfExit(String),

    /// `describe` was given blank text.
    #[error("description must not be empty")]
    EmptyDescription,

    /// Only leaves can be pruned: the room has more than one exit.
    #[error("room '{room}' has {exits} exits, only rooms with one exit can be deleted")]
    AmbiguousDeletion { room: String, exits: usize },

    /// The room has no exit, so there is nowhere to send its occupants.
    #[error("room '{0}' has no exits")]
    IsolatedRoom(String),

    /// New players start here; it must always exist.
    #[error("the starting room '{0}' cannot be deleted")]
    StartingRoomProtected(String),

    /// The snapshot could not be written (or read, on open).
    #[error("world persistence failed: {0}")]
    Persistence(#[from] ProtocolError),
}

impl WorldError {
    /// `true` for errors that should simply be reported back to the player.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::UnknownRoom(_) | Self::Persistence(_))
    }
}
