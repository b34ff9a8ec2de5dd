//! Creature spawner: populates zoned rooms on a world-wide cooldown.
//!
//! One counter for the whole world. It goes up every tick and drops back
//! to zero whenever anything spawns, so the threshold caps the total spawn
//! rate rather than the rate per room.

use crate::{Creature, CreatureKind, SpawnerConfig, WorldStore};

/// A creature that just appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnEvent {
    pub room: String,
    pub kind: CreatureKind,
}

/// Tick-driven spawner. Owned by the game loop next to the world.
#[derive(Debug)]
pub struct CreatureSpawner {
    config: SpawnerConfig,
    counter: u64,
}

impl CreatureSpawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self { config, counter: 0 }
    }

    /// Ticks since the last spawn.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Advances one tick and spawns at most one creature.
    ///
    /// Rooms are scanned in name order; the first room without a creature
    /// whose zone some bestiary kind lives in is the candidate. It gets
    /// that kind once the counter is past the threshold.
    pub fn tick(&mut self, world: &mut WorldStore) -> Option<SpawnEvent> {
        self.counter += 1;

        let (room, kind) = world.rooms().find_map(|room| {
            if !room.can_host_creature() {
                return None;
            }
            let zone = room.zone.as_deref()?;
            CreatureKind::first_for_zone(zone).map(|kind| (room.name.clone(), kind))
        })?;

        if self.counter <= self.config.threshold_ticks {
            return None;
        }

        if !world.place_creature(&room, Creature::new(kind)) {
            return None;
        }
        self.counter = 0;
        tracing::info!(%room, %kind, "creature spawned");
        Some(SpawnEvent { room, kind })
    }
}

impl Default for CreatureSpawner {
    fn default() -> Self {
        Self::new(SpawnerConfig::default())
    }
}
