//! The shared combatant shape for players, enemies, and pets.

use core::fmt;

use arrayvec::ArrayVec;

use super::affinity::Affinities;
use super::status::StatusEffects;
use crate::config::EngineConfig;
use crate::stats::{BaseStats, Bond, ClassKind, ResourceMeter};

/// Unique identifier for any combatant tracked by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to an equipment or consumable definition held by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

/// Reference to a skill definition held by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u32);

/// Reference to a passive definition held by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveId(pub u32);

/// Reference to an enemy template held by the enemy factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplateId(pub u32);

/// Defensive stance declared for the current round.
///
/// Set when a Block/Dodge/Counter action resolves, cleared when the owner
/// next acts, so the stance covers exactly the opponent's following action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stance {
    #[default]
    None,
    Block,
    Dodge,
    Counter,
}

/// One fighter: player, enemy, or pet.
///
/// Derived combat numbers are never stored here; [`crate::stats::effective`]
/// recomputes them on demand. The resolution pipeline is the only code that
/// mutates HP, mana, stamina, combo, stance, and statuses mid-round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub class: ClassKind,
    pub level: u32,
    pub base: BaseStats,
    pub hp: ResourceMeter,
    pub mana: ResourceMeter,
    pub stamina: ResourceMeter,
    pub affinities: Affinities,
    pub statuses: StatusEffects,
    /// Consecutive successful hits. Resets on a miss or an explicit defend.
    pub combo: u32,
    pub stance: Stance,
    pub equipment: ArrayVec<ItemId, { EngineConfig::MAX_EQUIPMENT }>,
    pub passives: ArrayVec<PassiveId, { EngineConfig::MAX_PASSIVES }>,
    pub skills: ArrayVec<SkillId, { EngineConfig::MAX_SKILLS }>,
    pub experience: u64,
    /// Pets only; scales combat stats by loyalty tier.
    pub bond: Option<Bond>,
}

impl Combatant {
    /// New combatant with meters sized by a rough level curve. Callers that
    /// want aggregated maxima should resize afterwards via
    /// [`Combatant::resize_meters`].
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        class: ClassKind,
        level: u32,
        base: BaseStats,
    ) -> Self {
        let hp = 50 + base.vitality as u32 * 12 + level * 8;
        let mana = 20 + base.intellect as u32 * 10 + base.wisdom as u32 * 4;
        let stamina = 30 + base.vitality as u32 * 5 + base.agility as u32 * 5;
        Self {
            id,
            name: name.into(),
            class,
            level,
            base,
            hp: ResourceMeter::full(hp),
            mana: ResourceMeter::full(mana),
            stamina: ResourceMeter::full(stamina),
            affinities: Affinities::none(),
            statuses: StatusEffects::empty(),
            combo: 0,
            stance: Stance::None,
            equipment: ArrayVec::new(),
            passives: ArrayVec::new(),
            skills: ArrayVec::new(),
            experience: 0,
            bond: None,
        }
    }

    /// Adopt aggregated maxima, keeping current values within range.
    pub fn resize_meters(&mut self, hp_max: u32, mana_max: u32, stamina_max: u32) {
        self.hp = ResourceMeter::new(self.hp.current.min(hp_max), hp_max);
        self.mana = ResourceMeter::new(self.mana.current.min(mana_max), mana_max);
        self.stamina = ResourceMeter::new(self.stamina.current.min(stamina_max), stamina_max);
    }

    /// At or below the death floor this fighter is out of the fight.
    pub fn is_down(&self, config: &EngineConfig) -> bool {
        self.hp.current <= config.death_floor
    }

    /// Wipe round-scoped combat state. Called when combat ends.
    pub fn leave_combat(&mut self) {
        self.statuses.clear();
        self.combo = 0;
        self.stance = Stance::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_combat_clears_round_state() {
        let mut c = Combatant::new(
            EntityId(1),
            "tester",
            ClassKind::Rogue,
            3,
            BaseStats::default(),
        );
        c.combo = 4;
        c.stance = Stance::Counter;
        c.statuses
            .apply(crate::state::EffectKind::Bleed, 2, 3);

        c.leave_combat();

        assert_eq!(c.combo, 0);
        assert_eq!(c.stance, Stance::None);
        assert!(c.statuses.is_empty());
    }

    #[test]
    fn down_exactly_at_the_floor() {
        let config = EngineConfig::default();
        let mut c = Combatant::new(
            EntityId(2),
            "fragile",
            ClassKind::Mage,
            1,
            BaseStats::default(),
        );
        c.hp = ResourceMeter::new(config.death_floor, 100);
        assert!(c.is_down(&config));
        c.hp.restore(1);
        assert!(!c.is_down(&config));
    }
}
