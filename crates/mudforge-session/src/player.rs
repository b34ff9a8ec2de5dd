//! Player types: the live session and the durable record.

use mudforge_transport::ConnectionId;
use serde::{Deserialize, Serialize};

/// A connected player.
///
/// `name` and `room` are both `None` until the first line arrives, then
/// both are set, once. A player with a name is "active".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: ConnectionId,
    pub name: Option<String>,
    pub room: Option<String>,
}

impl Player {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            name: None,
            room: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.name.is_some()
    }

    pub fn is_in(&self, room: &str) -> bool {
        self.room.as_deref() == Some(room)
    }
}

/// What survives a disconnect, keyed by player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub last_room: String,
}
