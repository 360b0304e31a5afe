//! Player game state machine.
//!
//! `GameState` is the single source of truth for what a player is doing.
//! Whether a player "is in combat" is a derived predicate, never a stored
//! flag, so the enum cannot drift from a boolean mutated elsewhere. The one
//! remaining drift source is the combat session itself (an enemy can be
//! handed to a session or dropped from it by code outside this module), and
//! [`PlayerStateData::sync`] reconciles against that before any action is
//! processed: the session data wins and the correction is reported so the
//! caller can log it.

use core::fmt;

use strum::EnumIter;

use crate::action::PlayerCommand;

/// Everything a player can be doing, from the engine's point of view.
///
/// Initial state is `Idle`; there is no terminal state. The machine runs for
/// the lifetime of the player record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    #[default]
    Idle,
    Exploring,
    InCombat,
    InDungeon,
    InDungeonCombat,
    Shopping,
    Resting,
    TravelMenu,
    PetManagement,
    SkillsMenu,
    ClassMenu,
    Crafting,
}

impl GameState {
    /// Derived combat predicate. This replaces any stored `is_in_combat`
    /// flag; there is nothing to keep in sync.
    pub fn is_in_combat(self) -> bool {
        matches!(self, GameState::InCombat | GameState::InDungeonCombat)
    }

    /// Menu-ish states a player can always back out of to Idle.
    pub fn is_menu(self) -> bool {
        matches!(
            self,
            GameState::Shopping
                | GameState::Resting
                | GameState::TravelMenu
                | GameState::PetManagement
                | GameState::SkillsMenu
                | GameState::ClassMenu
                | GameState::Crafting
        )
    }

    /// Static guard table: which commands are legal from which state.
    pub fn allows(self, command: &PlayerCommand) -> bool {
        match command {
            PlayerCommand::Combat(_) | PlayerCommand::Tame => self.is_in_combat(),

            PlayerCommand::Rest
            | PlayerCommand::Work
            | PlayerCommand::CraftMenu
            | PlayerCommand::ShopMenu
            | PlayerCommand::TravelMenu
            | PlayerCommand::PetMenu
            | PlayerCommand::SkillsMenu
            | PlayerCommand::ClassMenu
            | PlayerCommand::QuestMenu
            | PlayerCommand::EnterDungeon => self == GameState::Idle,

            PlayerCommand::Explore => {
                matches!(self, GameState::Idle | GameState::Exploring)
            }

            PlayerCommand::DungeonAdvance | PlayerCommand::LeaveDungeon => {
                self == GameState::InDungeon
            }

            PlayerCommand::Return => self.is_menu() || self == GameState::Exploring,

            // Reading your own sheet is always fine.
            PlayerCommand::Status => true,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameState::Idle => "idle",
            GameState::Exploring => "exploring",
            GameState::InCombat => "in combat",
            GameState::InDungeon => "in a dungeon",
            GameState::InDungeonCombat => "in dungeon combat",
            GameState::Shopping => "shopping",
            GameState::Resting => "resting",
            GameState::TravelMenu => "choosing a destination",
            GameState::PetManagement => "managing pets",
            GameState::SkillsMenu => "reviewing skills",
            GameState::ClassMenu => "reviewing classes",
            GameState::Crafting => "crafting",
        };
        write!(f, "{}", label)
    }
}

/// Correction produced by a reconciliation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncCorrection {
    pub from: GameState,
    pub to: GameState,
}

/// The machine's live data: current state plus display context.
///
/// `context` is a free-form tag (enemy name, dungeon id) for presentation
/// and debugging only. Control decisions read `current`, never `context`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStateData {
    pub current: GameState,
    /// Unix timestamp the current state was entered, supplied by the caller.
    pub entered_at: u64,
    pub context: Option<String>,
}

impl PlayerStateData {
    pub fn new(now: u64) -> Self {
        Self {
            current: GameState::Idle,
            entered_at: now,
            context: None,
        }
    }

    /// Unconditional transition, used when the resolution core signals
    /// combat start or end.
    pub fn transition_to(&mut self, state: GameState, context: Option<String>, now: u64) {
        self.current = state;
        self.entered_at = now;
        self.context = context;
    }

    /// Externally-driven escape hatch (a successful tame forces Idle).
    /// Returns the state that was abandoned so the caller can log the jump
    /// together with its reason.
    pub fn force(&mut self, state: GameState, now: u64) -> GameState {
        let previous = self.current;
        self.transition_to(state, None, now);
        previous
    }

    /// Reconcile `current` against the combat session before processing any
    /// action. Session data wins: a live enemy means a combat state, no
    /// enemy means no combat state.
    pub fn sync(&mut self, has_enemy: bool, in_dungeon: bool, now: u64) -> Option<SyncCorrection> {
        let corrected = if has_enemy && !self.current.is_in_combat() {
            if in_dungeon {
                GameState::InDungeonCombat
            } else {
                GameState::InCombat
            }
        } else if !has_enemy && self.current.is_in_combat() {
            if in_dungeon {
                GameState::InDungeon
            } else {
                GameState::Idle
            }
        } else {
            return None;
        };

        let correction = SyncCorrection {
            from: self.current,
            to: corrected,
        };
        let context = self.context.take();
        self.transition_to(corrected, context, now);
        Some(correction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CombatAction;
    use strum::IntoEnumIterator;

    #[test]
    fn rest_requires_idle() {
        assert!(GameState::Idle.allows(&PlayerCommand::Rest));
        assert!(!GameState::InCombat.allows(&PlayerCommand::Rest));
        assert!(!GameState::Shopping.allows(&PlayerCommand::Rest));
    }

    #[test]
    fn combat_actions_require_a_combat_state() {
        let attack = PlayerCommand::Combat(CombatAction::PhysicalAttack);
        assert!(GameState::InCombat.allows(&attack));
        assert!(GameState::InDungeonCombat.allows(&attack));
        for state in GameState::iter().filter(|s| !s.is_in_combat()) {
            assert!(!state.allows(&attack), "{state:?} should reject attacks");
        }
    }

    #[test]
    fn craft_menu_allowed_idle_only() {
        assert!(GameState::Idle.allows(&PlayerCommand::CraftMenu));
        assert!(!GameState::InCombat.allows(&PlayerCommand::CraftMenu));
    }

    #[test]
    fn is_in_combat_is_derived_from_the_enum() {
        for state in GameState::iter() {
            assert_eq!(
                state.is_in_combat(),
                matches!(state, GameState::InCombat | GameState::InDungeonCombat)
            );
        }
    }

    #[test]
    fn sync_pulls_state_into_combat_when_an_enemy_exists() {
        let mut data = PlayerStateData::new(0);
        let correction = data.sync(true, false, 10).expect("drift expected");
        assert_eq!(correction.from, GameState::Idle);
        assert_eq!(correction.to, GameState::InCombat);
        assert_eq!(data.current, GameState::InCombat);

        // A second pass is clean.
        assert!(data.sync(true, false, 11).is_none());
    }

    #[test]
    fn sync_drops_combat_state_when_the_enemy_is_gone() {
        let mut data = PlayerStateData::new(0);
        data.transition_to(GameState::InDungeonCombat, None, 5);
        let correction = data.sync(false, true, 20).expect("drift expected");
        assert_eq!(correction.to, GameState::InDungeon);
    }

    #[test]
    fn force_reports_the_abandoned_state() {
        let mut data = PlayerStateData::new(0);
        data.transition_to(GameState::InCombat, Some("wolf".into()), 3);
        let previous = data.force(GameState::Idle, 9);
        assert_eq!(previous, GameState::InCombat);
        assert_eq!(data.current, GameState::Idle);
        assert!(data.context.is_none());
    }
}
