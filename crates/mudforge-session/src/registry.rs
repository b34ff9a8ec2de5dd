//! The session registry: tracks every live connection and its player.
//!
//! `SessionRegistry` is NOT thread-safe by itself. It is owned by the game
//! loop and mutated only from there, one tick at a time.

use std::collections::BTreeMap;

use mudforge_protocol::{Outbox, START_ROOM};
use mudforge_transport::ConnectionId;

use crate::{Player, PlayerRegistry, SessionError};

/// Result of a successful [`SessionRegistry::bind_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindOutcome {
    pub name: String,
    pub room: String,
    /// `true` when the room came from a durable record.
    pub resumed: bool,
}

/// Live connection → player map, plus the optional durable registry.
///
/// ## Lifecycle
///
/// ```text
/// on_connect() ──→ bind_name() ──→ move_to()* ──→ on_disconnect()
///      │                │                               │
///      ▼                ▼                               ▼
///  [unnamed]         [active]                      [removed]
/// ```
///
/// Two live connections may carry the same name at once; nothing here
/// checks for it.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// Keyed by id so broadcasts go out in connection order.
    players: BTreeMap<ConnectionId, Player>,

    /// `None` runs the non-persistent variant: every name starts fresh.
    records: Option<PlayerRegistry>,
}

impl SessionRegistry {
    /// Creates a registry; pass a [`PlayerRegistry`] to remember where
    /// players were across reconnects.
    pub fn new(records: Option<PlayerRegistry>) -> Self {
        Self {
            players: BTreeMap::new(),
            records,
        }
    }

    /// Registers a fresh, unnamed player for a new connection.
    pub fn on_connect(&mut self, id: ConnectionId) {
        if self.players.insert(id, Player::new(id)).is_some() {
            tracing::warn!(%id, "connection id reused, previous player dropped");
        }
        tracing::info!(%id, "player connected");
    }

    /// Removes the player for `id`. Returns their name, or `None` if they
    /// never chose one (or `id` was unknown).
    pub fn on_disconnect(&mut self, id: ConnectionId) -> Option<String> {
        let player = self.players.remove(&id)?;
        tracing::info!(%id, name = ?player.name, "player disconnected");
        player.name
    }

    /// Names the player for `id` and places them in a room.
    ///
    /// A name with a durable record resumes at its last room, provided
    /// `room_exists` still says yes; everyone else starts at
    /// [`START_ROOM`]. New or repaired records are saved.
    ///
    /// # Errors
    /// - [`SessionError::UnknownConnection`]: no player for `id`
    /// - [`SessionError::AlreadyNamed`]: the player already has a name
    /// - [`SessionError::EmptyName`]: `proposed` is blank
    pub fn bind_name(
        &mut self,
        id: ConnectionId,
        proposed: &str,
        room_exists: impl Fn(&str) -> bool,
    ) -> Result<BindOutcome, SessionError> {
        let player = self
            .players
            .get(&id)
            .ok_or(SessionError::UnknownConnection(id))?;
        if player.is_active() {
            return Err(SessionError::AlreadyNamed(id));
        }
        let name = proposed.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        let remembered = self
            .records
            .as_ref()
            .and_then(|records| records.get(name))
            .map(|record| record.last_room.clone());
        let (room, resumed) = match remembered {
            Some(room) if room_exists(&room) => (room, true),
            Some(room) => {
                tracing::warn!(%name, %room, "remembered room is gone, starting over");
                (START_ROOM.to_string(), false)
            }
            None => (START_ROOM.to_string(), false),
        };
        self.remember(name, &room);

        if let Some(player) = self.players.get_mut(&id) {
            player.name = Some(name.to_string());
            player.room = Some(room.clone());
        }
        tracing::info!(%id, %name, %room, resumed, "player named");

        Ok(BindOutcome {
            name: name.to_string(),
            room,
            resumed,
        })
    }

    /// Moves an active player to `room` and records it.
    ///
    /// # Errors
    /// [`SessionError::UnknownConnection`] or [`SessionError::NotNamed`].
    pub fn move_to(&mut self, id: ConnectionId, room: &str) -> Result<(), SessionError> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(SessionError::UnknownConnection(id))?;
        let name = player.name.clone().ok_or(SessionError::NotNamed(id))?;
        player.room = Some(room.to_string());
        self.remember(&name, room);
        tracing::debug!(%id, %name, %room, "player moved");
        Ok(())
    }

    /// Moves everyone in `from` to `to`. Returns who was moved.
    pub fn relocate_room(&mut self, from: &str, to: &str) -> Vec<ConnectionId> {
        let moved: Vec<ConnectionId> = self
            .players
            .values()
            .filter(|p| p.is_active() && p.is_in(from))
            .map(|p| p.id)
            .collect();
        for id in &moved {
            // Every id came from an active player above.
            let _ = self.move_to(*id, to);
        }
        moved
    }

    /// Queues `line` for every active player matching `predicate`.
    pub fn broadcast(
        &self,
        outbox: &mut Outbox,
        predicate: impl Fn(&Player) -> bool,
        line: &str,
    ) {
        let ids = self
            .players
            .values()
            .filter(|p| p.is_active() && predicate(p))
            .map(|p| p.id);
        outbox.send_all(ids, line);
    }

    /// Queues `line` for every active player in `room`, optionally
    /// skipping one connection.
    pub fn broadcast_room(
        &self,
        outbox: &mut Outbox,
        room: &str,
        except: Option<ConnectionId>,
        line: &str,
    ) {
        self.broadcast(outbox, |p| p.is_in(room) && Some(p.id) != except, line);
    }

    /// Active players currently in `room`, in connection order.
    pub fn players_in<'a>(&'a self, room: &'a str) -> impl Iterator<Item = &'a Player> + 'a {
        self.players
            .values()
            .filter(move |p| p.is_active() && p.is_in(room))
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Number of live connections, named or not.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Saves `room` as `name`'s last room. Failures are logged, not
    /// returned.
    fn remember(&mut self, name: &str, room: &str) {
        if let Some(records) = self.records.as_mut() {
            if let Err(e) = records.upsert(name, room) {
                tracing::error!(%name, %room, error = %e, "failed to persist player record");
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
