//! Immutable outputs of the resolution pipeline.

use crate::action::CombatAction;
use crate::state::{Affinity, DamageType, EffectKind, ItemId, TickReport};
use crate::stats::{Bond, ResourceKind};

/// A status effect that landed during resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    pub kind: EffectKind,
    pub turns: u32,
    pub intensity: u32,
    /// Landed on the actor (ward) rather than the target.
    pub on_self: bool,
}

/// What an Observe action learned about the target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealedInfo {
    pub hp_percent: u32,
    pub affinities: Vec<(DamageType, Affinity)>,
}

/// Outcome of one resolved action. Consumed by presentation and by the
/// round orchestrator to decide transitions; never mutated after the fact.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub action: CombatAction,
    /// Control effect that forced this action to be skipped.
    pub skipped: Option<EffectKind>,
    pub hit: bool,
    pub critical: bool,
    pub dodged: bool,
    pub damage: u32,
    pub damage_type: Option<DamageType>,
    pub effects_inflicted: Vec<AppliedEffect>,
    pub combo_after: u32,
    /// Damage reflected back at the actor by a Counter stance.
    pub counter_damage: u32,
    pub actor_defeated: bool,
    pub target_defeated: bool,
    /// `Some(success)` for flee attempts, `None` otherwise.
    pub fled: Option<bool>,
    pub restored: Option<(ResourceKind, u32)>,
    pub revealed: Option<RevealedInfo>,
}

impl CombatResult {
    /// Empty result scaffold for an action; the pipeline fills in what
    /// actually happened.
    pub(crate) fn scaffold(action: CombatAction) -> Self {
        Self {
            action,
            skipped: None,
            hit: false,
            critical: false,
            dodged: false,
            damage: 0,
            damage_type: None,
            effects_inflicted: Vec::new(),
            combo_after: 0,
            counter_damage: 0,
            actor_defeated: false,
            target_defeated: false,
            fled: None,
            restored: None,
            revealed: None,
        }
    }
}

/// How a full round left the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundOutcome {
    Ongoing,
    Victory {
        xp: u64,
        levels_gained: u32,
        loot: Vec<ItemId>,
    },
    /// Soft defeat: the session revives the player and leaves combat.
    Defeat,
    Fled,
    Tamed {
        bond: Bond,
    },
}

/// Everything one submitted action produced: the player's resolution, the
/// enemy's response (when combat continued), both end-of-round ticks, and
/// the terminal outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundReport {
    pub player: CombatResult,
    pub enemy_action: Option<CombatAction>,
    pub enemy: Option<CombatResult>,
    pub enemy_tick: TickReport,
    pub player_tick: TickReport,
    pub outcome: RoundOutcome,
}

impl RoundReport {
    pub(crate) fn new(player: CombatResult) -> Self {
        Self {
            player,
            enemy_action: None,
            enemy: None,
            enemy_tick: TickReport::default(),
            player_tick: TickReport::default(),
            outcome: RoundOutcome::Ongoing,
        }
    }
}
