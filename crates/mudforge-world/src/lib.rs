//! World state for Mudforge.
//!
//! The world is a graph of named rooms joined by one-way exits. It is
//! owned by a single [`WorldStore`] that the game loop mutates directly;
//! every mutation is persisted before it becomes visible.
//!
//! # Key types
//!
//! - [`Room`]: a node: description, exits, optional zone and creature
//! - [`WorldStore`]: lookup, create-or-link, describe, zone, delete
//! - [`CreatureKind`]: the fixed bestiary and the zones each kind lives in
//! - [`CreatureSpawner`]: tick-driven population of zoned rooms
//! - [`SpawnerConfig`]: spawner settings

mod bestiary;
mod config;
mod error;
mod room;
mod spawner;
mod store;

pub use bestiary::{Creature, CreatureKind};
pub use config::SpawnerConfig;
pub use error::WorldError;
pub use room::Room;
pub use spawner::{CreatureSpawner, SpawnEvent};
pub use store::{ExitOutcome, WorldStore, ZoneReply};
