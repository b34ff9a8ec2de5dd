//! The world store: owns the room graph and keeps it on disk.
//!
//! Every mutation follows the same shape: build the next graph on a copy,
//! write the copy out, and only then swap it in. If the write fails the
//! in-memory world is exactly what it was before the command.

use std::collections::BTreeMap;

use mudforge_protocol::{Codec, JsonCodec, START_ROOM, Storage, text};

use crate::{Creature, Room, WorldError};

type RoomMap = BTreeMap<String, Room>;

/// What `create_exit` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The target already existed; only the exit was added.
    Linked,
    /// The target was materialized with a back-exit and a placeholder
    /// description.
    Created,
}

/// What `zone` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneReply {
    /// Query: the room's zone, if it has one.
    Current(Option<String>),
    /// The zone was set to this value.
    Set(String),
}

/// Owns every room. Lives on the game loop; no interior locking.
pub struct WorldStore {
    rooms: RoomMap,
    storage: Box<dyn Storage>,
    codec: JsonCodec,
}

impl WorldStore {
    /// Loads the world from `storage`, seeding and saving the default
    /// world when nothing was stored yet.
    ///
    /// Loaded snapshots are repaired rather than rejected: exits to rooms
    /// that don't exist are dropped and a missing starting room is
    /// re-seeded, both with a warning.
    ///
    /// # Errors
    /// [`WorldError::Persistence`] if the snapshot can't be read, decoded
    /// or (after seeding or repair) written back.
    pub fn open(storage: impl Storage) -> Result<Self, WorldError> {
        let codec = JsonCodec;
        let location = storage.location();

        let (rooms, dirty) = match storage.load()? {
            Some(bytes) => {
                let mut rooms: RoomMap = codec.decode(&bytes)?;
                for (name, room) in rooms.iter_mut() {
                    room.name = name.clone();
                }
                let repaired = repair(&mut rooms);
                tracing::info!(%location, rooms = rooms.len(), "world loaded");
                (rooms, repaired)
            }
            None => {
                tracing::info!(%location, "no world snapshot, seeding default world");
                (default_rooms(), true)
            }
        };

        let mut store = Self {
            rooms: RoomMap::new(),
            storage: Box::new(storage),
            codec,
        };
        if dirty {
            store.commit(rooms)?;
        } else {
            store.rooms = rooms;
        }
        Ok(store)
    }

    // -- Queries ----------------------------------------------------------

    /// Looks up a room.
    ///
    /// # Errors
    /// [`WorldError::UnknownRoom`] if no room has that name.
    pub fn get_room(&self, name: &str) -> Result<&Room, WorldError> {
        self.rooms
            .get(name)
            .ok_or_else(|| WorldError::UnknownRoom(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    /// All rooms, in name order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn room_names(&self) -> Vec<&str> {
        self.rooms.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Matches what a player typed against the exits of `room`.
    ///
    /// An exact match wins; otherwise a single case-insensitive match is
    /// accepted. Returns the exit's canonical name.
    ///
    /// # Errors
    /// [`WorldError::UnknownExit`] when nothing (or more than one exit)
    /// matches.
    pub fn resolve_exit(&self, room: &str, typed: &str) -> Result<String, WorldError> {
        let room = self.get_room(room)?;
        let typed = typed.trim();
        if room.has_exit(typed) {
            return Ok(typed.to_string());
        }

        let mut matches = room
            .exits
            .iter()
            .filter(|exit| exit.to_lowercase() == typed.to_lowercase());
        match (matches.next(), matches.next()) {
            (Some(exit), None) => Ok(exit.clone()),
            _ => Err(WorldError::UnknownExit(typed.to_string())),
        }
    }

    // -- Mutations --------------------------------------------------------

    /// Adds an exit from `from` to `exit`, creating the target room when
    /// it doesn't exist yet (create-or-link).
    ///
    /// A created room gets a placeholder description and a single exit
    /// back to `from`. Linking to an existing room adds no back-exit.
    ///
    /// # Errors
    /// - [`WorldError::EmptyExitName`] for a blank name
    /// - [`WorldError::SelfExit`] when `exit == from`
    /// - [`WorldError::ExitAlreadyExists`] when the exit is already there
    pub fn create_exit(&mut self, from: &str, exit: &str) -> Result<ExitOutcome, WorldError> {
        let exit = exit.trim();
        if exit.is_empty() {
            return Err(WorldError::EmptyExitName);
        }
        if exit == from {
            return Err(WorldError::SelfExit(from.to_string()));
        }
        if self.get_room(from)?.has_exit(exit) {
            return Err(WorldError::ExitAlreadyExists {
                room: from.to_string(),
                exit: exit.to_string(),
            });
        }

        let mut next = self.rooms.clone();
        let outcome = if next.contains_key(exit) {
            ExitOutcome::Linked
        } else {
            let room = Room::new(exit, text::placeholder_description(exit)).with_exit(from);
            next.insert(exit.to_string(), room);
            ExitOutcome::Created
        };
        if let Some(room) = next.get_mut(from) {
            room.exits.insert(exit.to_string());
        }

        self.commit(next)?;
        tracing::info!(%from, %exit, ?outcome, "exit created");
        Ok(outcome)
    }

    /// Replaces a room's description.
    ///
    /// # Errors
    /// [`WorldError::EmptyDescription`] if `description` is blank.
    pub fn set_description(&mut self, room: &str, description: &str) -> Result<(), WorldError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(WorldError::EmptyDescription);
        }
        self.get_room(room)?;

        let mut next = self.rooms.clone();
        if let Some(r) = next.get_mut(room) {
            r.description = description.to_string();
        }
        self.commit(next)?;
        tracing::debug!(%room, "description updated");
        Ok(())
    }

    /// Queries (`arg` blank) or sets a room's zone.
    pub fn zone(&mut self, room: &str, arg: &str) -> Result<ZoneReply, WorldError> {
        let arg = arg.trim();
        let current = self.get_room(room)?.zone.clone();
        if arg.is_empty() {
            return Ok(ZoneReply::Current(current));
        }

        let mut next = self.rooms.clone();
        if let Some(r) = next.get_mut(room) {
            r.zone = Some(arg.to_string());
        }
        self.commit(next)?;
        tracing::info!(%room, zone = %arg, "zone set");
        Ok(ZoneReply::Set(arg.to_string()))
    }

    /// Removes a leaf room and returns the room its occupants fall back to.
    ///
    /// The room must have exactly one exit; that exit is the fallback.
    /// Every exit in the world that pointed at the deleted room goes too.
    ///
    /// # Errors
    /// - [`WorldError::StartingRoomProtected`] for the starting room
    /// - [`WorldError::IsolatedRoom`] when the room has no exit
    /// - [`WorldError::AmbiguousDeletion`] when it has more than one
    pub fn delete_room(&mut self, room: &str) -> Result<String, WorldError> {
        if room == START_ROOM {
            return Err(WorldError::StartingRoomProtected(room.to_string()));
        }
        let target = self.get_room(room)?;
        let fallback = match target.exits.len() {
            0 => return Err(WorldError::IsolatedRoom(room.to_string())),
            1 => target.exits.iter().next().cloned().unwrap_or_default(),
            exits => {
                return Err(WorldError::AmbiguousDeletion {
                    room: room.to_string(),
                    exits,
                });
            }
        };
        if !self.contains(&fallback) {
            tracing::error!(%room, %fallback, "exit points at a missing room");
            return Err(WorldError::UnknownRoom(fallback));
        }

        let mut next = self.rooms.clone();
        next.remove(room);
        for other in next.values_mut() {
            other.exits.remove(room);
        }
        self.commit(next)?;
        tracing::info!(%room, %fallback, "room deleted");
        Ok(fallback)
    }

    /// Puts a creature in a room. Returns `false` (and changes nothing)
    /// when the room is missing or already occupied.
    pub fn place_creature(&mut self, room: &str, creature: Creature) -> bool {
        match self.rooms.get_mut(room) {
            Some(r) if r.creature.is_none() => {
                r.creature = Some(creature);
                true
            }
            _ => false,
        }
    }

    /// Writes `next` out and makes it the current world.
    fn commit(&mut self, next: RoomMap) -> Result<(), WorldError> {
        let bytes = self.codec.encode(&next)?;
        if let Err(e) = self.storage.save(&bytes) {
            tracing::error!(
                location = %self.storage.location(),
                error = %e,
                "failed to persist world"
            );
            return Err(e.into());
        }
        self.rooms = next;
        Ok(())
    }
}

impl std::fmt::Debug for WorldStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldStore")
            .field("rooms", &self.rooms.len())
            .field("storage", &self.storage.location())
            .finish()
    }
}

/// The world a fresh server starts with.
fn default_rooms() -> RoomMap {
    [
        Room::new(
            START_ROOM,
            "Sei in una confortevole taverna riscaldata da un caminetto",
        )
        .with_exit("Esterno"),
        Room::new("Esterno", "Ti trovi fuori da una taverna. Sta piovendo.")
            .with_exit(START_ROOM)
            .with_zone("bosco"),
    ]
    .into_iter()
    .map(|room| (room.name.clone(), room))
    .collect()
}

/// Drops dangling exits and re-seeds a missing starting room.
/// Returns `true` if anything changed.
fn repair(rooms: &mut RoomMap) -> bool {
    let mut changed = false;

    if !rooms.contains_key(START_ROOM) {
        tracing::warn!(room = START_ROOM, "starting room missing from snapshot, re-seeding");
        let seed = default_rooms().remove(START_ROOM).map(|mut room| {
            room.exits.clear();
            room
        });
        if let Some(room) = seed {
            rooms.insert(START_ROOM.to_string(), room);
            changed = true;
        }
    }

    let names: Vec<String> = rooms.keys().cloned().collect();
    for room in rooms.values_mut() {
        let before = room.exits.len();
        room.exits.retain(|exit| names.contains(exit));
        if room.exits.len() != before {
            tracing::warn!(room = %room.name, "dropped exits to missing rooms");
            changed = true;
        }
    }

    changed
}
