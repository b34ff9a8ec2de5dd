//! The durable player registry: name → last room.

use std::collections::BTreeMap;

use mudforge_protocol::{Codec, JsonCodec, Storage};

use crate::{PlayerRecord, SessionError};

/// Remembers where every player who ever chose a name was last seen.
///
/// Records are created on first use, updated on every room change and
/// never deleted. Each change rewrites the whole snapshot.
pub struct PlayerRegistry {
    records: BTreeMap<String, PlayerRecord>,
    storage: Box<dyn Storage>,
    codec: JsonCodec,
}

impl PlayerRegistry {
    /// Loads the registry; an empty storage means no players yet.
    ///
    /// # Errors
    /// [`SessionError::Persistence`] if the snapshot can't be read or
    /// decoded.
    pub fn open(storage: impl Storage) -> Result<Self, SessionError> {
        let codec = JsonCodec;
        let records: BTreeMap<String, PlayerRecord> = match storage.load()? {
            Some(bytes) => codec.decode(&bytes)?,
            None => BTreeMap::new(),
        };
        tracing::info!(
            location = %storage.location(),
            players = records.len(),
            "player registry loaded"
        );
        Ok(Self {
            records,
            storage: Box::new(storage),
            codec,
        })
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.records.get(name)
    }

    /// Records `room` as `name`'s last room and persists the registry.
    /// Writing the same room again is a no-op.
    ///
    /// # Errors
    /// [`SessionError::Persistence`] if the snapshot can't be written; the
    /// in-memory registry is left unchanged in that case.
    pub fn upsert(&mut self, name: &str, room: &str) -> Result<(), SessionError> {
        if self.get(name).is_some_and(|r| r.last_room == room) {
            return Ok(());
        }

        let mut next = self.records.clone();
        next.insert(
            name.to_string(),
            PlayerRecord {
                last_room: room.to_string(),
            },
        );
        let bytes = self.codec.encode(&next)?;
        self.storage.save(&bytes)?;
        self.records = next;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl std::fmt::Debug for PlayerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerRegistry")
            .field("players", &self.records.len())
            .field("storage", &self.storage.location())
            .finish()
    }
}
