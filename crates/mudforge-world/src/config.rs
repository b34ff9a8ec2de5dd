//! Spawner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the [`CreatureSpawner`](crate::CreatureSpawner).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerConfig {
    /// Ticks that must pass (strictly more than this) between two spawns
    /// anywhere in the world. At the default 5 Hz, 150 ticks is 30 s.
    pub threshold_ticks: u64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            threshold_ticks: 150,
        }
    }
}
