//! Read-only catalog interfaces the engine consumes.
//!
//! Equipment, skill, passive, and consumable definitions live outside the
//! engine (authored content, database, whatever the host bot uses). The
//! engine only ever sees them through these traits, injected per call, so
//! there are no module-level content globals to keep in sync.

use crate::action::ActionProfile;
use crate::state::{EnemySnapshot, EnemyTemplateId, ItemId, PassiveId, SkillId};
use crate::stats::{Bonus, ResourceKind, StatKind};

/// One stat bonus contributed by an item or passive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonus {
    pub stat: StatKind,
    pub bonus: Bonus,
}

/// An equippable item's contribution to aggregation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDefinition {
    pub id: ItemId,
    pub name: String,
    pub bonuses: Vec<StatBonus>,
}

impl EquipmentDefinition {
    pub fn bonuses_for(&self, stat: StatKind) -> impl Iterator<Item = Bonus> + '_ {
        self.bonuses
            .iter()
            .filter(move |b| b.stat == stat)
            .map(|b| b.bonus)
    }
}

/// An unlocked passive's contribution to aggregation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveDefinition {
    pub id: PassiveId,
    pub name: String,
    pub bonuses: Vec<StatBonus>,
}

impl PassiveDefinition {
    pub fn bonuses_for(&self, stat: StatKind) -> impl Iterator<Item = Bonus> + '_ {
        self.bonuses
            .iter()
            .filter(move |b| b.stat == stat)
            .map(|b| b.bonus)
    }
}

/// A learnable skill: a named strike profile with its own cost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub profile: ActionProfile,
}

/// A usable item: restores a resource and/or cleanses damage over time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableDefinition {
    pub id: ItemId,
    pub name: String,
    pub restores: Option<(ResourceKind, u32)>,
    pub cures_damage_over_time: bool,
}

/// Lookup surface for everything the stat aggregator and resolver read.
///
/// Lookups are tolerant by contract: `None` means the id contributes
/// nothing to aggregation. Only skills and consumables, where the player
/// explicitly named the id, turn a miss into a typed error.
pub trait StatCatalog: Send + Sync {
    fn equipment(&self, id: ItemId) -> Option<&EquipmentDefinition>;
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition>;
    fn passive(&self, id: PassiveId) -> Option<&PassiveDefinition>;
    fn consumable(&self, id: ItemId) -> Option<&ConsumableDefinition>;
}

/// Encounter difficulty requested by the exploration collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Produces enemy snapshots scaled to the player.
pub trait EnemyFactory: Send + Sync {
    fn spawn(
        &self,
        template: EnemyTemplateId,
        player_level: u32,
        difficulty: Difficulty,
    ) -> Option<EnemySnapshot>;
}
