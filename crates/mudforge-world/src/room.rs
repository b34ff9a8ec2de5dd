//! The room record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Creature;

/// A node of the world graph.
///
/// Serialized as the value of a `name → room` map, so the name itself is
/// not part of the record on disk; neither is the creature, which only
/// lives as long as the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(skip)]
    pub name: String,

    pub description: String,

    /// Names of the rooms reachable from here. Exits are one-way.
    #[serde(default)]
    pub exits: BTreeSet<String>,

    /// Spawn tag. `None` means nothing ever spawns here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    #[serde(skip)]
    pub creature: Option<Creature>,
}

impl Room {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exits: BTreeSet::new(),
            zone: None,
            creature: None,
        }
    }

    /// Builder-style helper used when seeding worlds.
    pub fn with_exit(mut self, exit: impl Into<String>) -> Self {
        self.exits.insert(exit.into());
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn has_exit(&self, name: &str) -> bool {
        self.exits.contains(name)
    }

    /// `true` when the spawner may place a creature here.
    pub fn can_host_creature(&self) -> bool {
        self.creature.is_none() && self.zone.is_some()
    }
}
