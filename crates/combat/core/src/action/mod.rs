//! Player-facing commands and the closed combat action set.

pub mod profile;

use core::fmt;

use crate::env::StatCatalog;
use crate::error::EngineError;
use crate::state::{ItemId, SkillId, Stance};

pub use profile::{ActionProfile, ActionRoute, EffectSpec, ResourceCost, ScalingStat};

/// A single combat-round intent.
///
/// The set is closed: chat input is parsed into one of these variants (or
/// rejected) before it ever reaches the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    PhysicalAttack,
    MagicalAttack,
    ChargeAttack,
    PreciseAttack,
    HeavyAttack,
    Block,
    Dodge,
    Counter,
    Meditate,
    Observe,
    UseItem(ItemId),
    Skill(SkillId),
    Flee,
    Wait,
}

impl CombatAction {
    /// Resolve this action to its pipeline route.
    ///
    /// Built-in offensive variants carry built-in profiles; skills pull
    /// theirs from the catalog. This is the only place per-variant numbers
    /// live; the resolver itself never branches on the variant.
    pub fn route(self, catalog: &dyn StatCatalog) -> Result<ActionRoute, EngineError> {
        let route = match self {
            CombatAction::PhysicalAttack => ActionRoute::Strike(ActionProfile::physical(100)),
            CombatAction::MagicalAttack => ActionRoute::Strike(ActionProfile {
                power: 110,
                cost: Some(ResourceCost::mana(8)),
                damage_type: crate::state::DamageType::Arcane,
                scaling: ScalingStat::MagicPower,
                ..ActionProfile::physical(110)
            }),
            CombatAction::ChargeAttack => ActionRoute::Strike(ActionProfile {
                hit_mod: -10,
                cost: Some(ResourceCost::stamina(10)),
                ..ActionProfile::physical(140)
            }),
            CombatAction::PreciseAttack => ActionRoute::Strike(ActionProfile {
                hit_mod: 15,
                crit_mod: 15,
                cost: Some(ResourceCost::stamina(5)),
                ..ActionProfile::physical(80)
            }),
            CombatAction::HeavyAttack => ActionRoute::Strike(ActionProfile {
                hit_mod: -20,
                cost: Some(ResourceCost::stamina(15)),
                ..ActionProfile::physical(180)
            }),
            CombatAction::Block => ActionRoute::Guard(Stance::Block),
            CombatAction::Dodge => ActionRoute::Guard(Stance::Dodge),
            CombatAction::Counter => ActionRoute::Guard(Stance::Counter),
            CombatAction::Meditate => ActionRoute::Recover,
            CombatAction::Observe => ActionRoute::Inspect,
            CombatAction::UseItem(item) => ActionRoute::Consume(item),
            CombatAction::Skill(skill) => {
                let def = catalog
                    .skill(skill)
                    .ok_or(EngineError::UnknownSkill(skill.0))?;
                ActionRoute::Strike(def.profile)
            }
            CombatAction::Flee => ActionRoute::Escape,
            CombatAction::Wait => ActionRoute::Pass,
        };
        Ok(route)
    }
}

impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CombatAction::PhysicalAttack => "attack",
            CombatAction::MagicalAttack => "cast",
            CombatAction::ChargeAttack => "charge",
            CombatAction::PreciseAttack => "precise strike",
            CombatAction::HeavyAttack => "heavy strike",
            CombatAction::Block => "block",
            CombatAction::Dodge => "dodge",
            CombatAction::Counter => "counter",
            CombatAction::Meditate => "meditate",
            CombatAction::Observe => "observe",
            CombatAction::UseItem(_) => "use item",
            CombatAction::Skill(_) => "skill",
            CombatAction::Flee => "flee",
            CombatAction::Wait => "wait",
        };
        write!(f, "{}", label)
    }
}

/// Everything a player can ask the engine to do, combat or not.
///
/// The state machine's guard table decides which of these are legal from
/// which state; combat variants then pass through the resolution pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerCommand {
    Combat(CombatAction),
    /// Attempt to tame the current enemy. The taming roll itself happens
    /// outside the engine; see the taming oracle.
    Tame,
    Explore,
    EnterDungeon,
    DungeonAdvance,
    LeaveDungeon,
    Rest,
    Work,
    CraftMenu,
    ShopMenu,
    TravelMenu,
    PetMenu,
    SkillsMenu,
    ClassMenu,
    QuestMenu,
    /// Back out of a menu to Idle.
    Return,
    Status,
}

impl fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerCommand::Combat(action) => return write!(f, "{}", action),
            PlayerCommand::Tame => "tame",
            PlayerCommand::Explore => "explore",
            PlayerCommand::EnterDungeon => "enter dungeon",
            PlayerCommand::DungeonAdvance => "advance",
            PlayerCommand::LeaveDungeon => "leave dungeon",
            PlayerCommand::Rest => "rest",
            PlayerCommand::Work => "work",
            PlayerCommand::CraftMenu => "craft menu",
            PlayerCommand::ShopMenu => "shop menu",
            PlayerCommand::TravelMenu => "travel menu",
            PlayerCommand::PetMenu => "pet menu",
            PlayerCommand::SkillsMenu => "skills menu",
            PlayerCommand::ClassMenu => "class menu",
            PlayerCommand::QuestMenu => "quest menu",
            PlayerCommand::Return => "return",
            PlayerCommand::Status => "status",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::testing::EmptyCatalog;

    #[test]
    fn heavy_trades_accuracy_for_power() {
        let catalog = EmptyCatalog;
        let heavy = match CombatAction::HeavyAttack.route(&catalog).unwrap() {
            ActionRoute::Strike(p) => p,
            other => panic!("expected strike, got {other:?}"),
        };
        let precise = match CombatAction::PreciseAttack.route(&catalog).unwrap() {
            ActionRoute::Strike(p) => p,
            other => panic!("expected strike, got {other:?}"),
        };
        assert!(heavy.power > precise.power);
        assert!(heavy.hit_mod < precise.hit_mod);
        assert!(precise.crit_mod > heavy.crit_mod);
    }

    #[test]
    fn unknown_skill_is_a_typed_error() {
        let catalog = EmptyCatalog;
        let result = CombatAction::Skill(crate::state::SkillId(404)).route(&catalog);
        assert_eq!(result, Err(EngineError::UnknownSkill(404)));
    }
}
