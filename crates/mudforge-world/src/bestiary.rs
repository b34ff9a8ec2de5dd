//! The fixed bestiary.

use std::fmt;

/// Every creature that can appear in the world, with the zones it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatureKind {
    Topo,
    Lupo,
    Pipistrello,
    Goblin,
    Spettro,
}

impl CreatureKind {
    /// Scan order used by the spawner.
    pub const ALL: [CreatureKind; 5] = [
        Self::Topo,
        Self::Lupo,
        Self::Pipistrello,
        Self::Goblin,
        Self::Spettro,
    ];

    /// Display name, as players see it.
    pub fn name(self) -> &'static str {
        match self {
            Self::Topo => "topo",
            Self::Lupo => "lupo",
            Self::Pipistrello => "pipistrello",
            Self::Goblin => "goblin",
            Self::Spettro => "spettro",
        }
    }

    /// Zones this kind may spawn in.
    pub fn zones(self) -> &'static [&'static str] {
        match self {
            Self::Topo => &["cantina", "bosco"],
            Self::Lupo => &["bosco", "montagna"],
            Self::Pipistrello => &["grotta"],
            Self::Goblin => &["grotta", "montagna"],
            Self::Spettro => &["rovine"],
        }
    }

    pub fn lives_in(self, zone: &str) -> bool {
        self.zones().contains(&zone)
    }

    /// First kind in bestiary order that lives in `zone`.
    pub fn first_for_zone(zone: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.lives_in(zone))
    }
}

impl fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A creature sitting in a room. It has no identity beyond its room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creature {
    pub kind: CreatureKind,
}

impl Creature {
    pub fn new(kind: CreatureKind) -> Self {
        Self { kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_for_zone_follows_bestiary_order() {
        assert_eq!(CreatureKind::first_for_zone("bosco"), Some(CreatureKind::Topo));
        assert_eq!(CreatureKind::first_for_zone("montagna"), Some(CreatureKind::Lupo));
        assert_eq!(CreatureKind::first_for_zone("grotta"), Some(CreatureKind::Pipistrello));
    }

    #[test]
    fn test_first_for_zone_unknown_zone_is_none() {
        assert_eq!(CreatureKind::first_for_zone("mare"), None);
    }

    #[test]
    fn test_every_kind_has_a_zone() {
        for kind in CreatureKind::ALL {
            assert!(!kind.zones().is_empty(), "{kind} has no zone");
        }
    }
}
