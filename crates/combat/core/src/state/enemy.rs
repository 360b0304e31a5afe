//! Enemy snapshots produced by the enemy factory.

use super::combatant::{Combatant, ItemId};
use crate::behavior::BehaviorProfile;

/// Chance-weighted drop entry on an enemy's loot table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: ItemId,
    /// Drop chance in percent, rolled once on victory.
    pub chance: u32,
}

/// A fully materialized opponent handed to the engine at encounter start.
///
/// The factory scales the combatant to the player's level before the
/// snapshot reaches the engine; the engine itself never rescales.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySnapshot {
    pub combatant: Combatant,
    pub behavior: BehaviorProfile,
    pub xp_reward: u64,
    pub loot: Vec<LootEntry>,
    /// Encounter happened inside a dungeon; drives which combat state the
    /// session enters and returns to.
    pub dungeon: bool,
    pub tameable: bool,
}

impl EnemySnapshot {
    pub fn new(combatant: Combatant, behavior: BehaviorProfile) -> Self {
        Self {
            combatant,
            behavior,
            xp_reward: 0,
            loot: Vec::new(),
            dungeon: false,
            tameable: false,
        }
    }

    pub fn with_rewards(mut self, xp: u64, loot: Vec<LootEntry>) -> Self {
        self.xp_reward = xp;
        self.loot = loot;
        self
    }

    pub fn in_dungeon(mut self) -> Self {
        self.dungeon = true;
        self
    }

    pub fn tameable(mut self) -> Self {
        self.tameable = true;
        self
    }
}
