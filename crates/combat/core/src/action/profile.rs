//! Action profiles: one resolution pipeline, many parameterizations.
//!
//! Every offensive action, built-in or skill, is described by the same
//! profile shape. Charge, Precise, and Heavy are not separate algorithms;
//! they are different numbers fed into the same hit/crit/damage steps, and
//! that uniformity is the invariant this module protects.

use crate::state::{DamageType, EffectKind, Stance};
use crate::stats::{EffectiveStats, ResourceKind};

/// Which aggregated stat scales an action's raw damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingStat {
    Attack,
    MagicPower,
}

impl ScalingStat {
    pub fn value(self, stats: &EffectiveStats) -> i32 {
        match self {
            ScalingStat::Attack => stats.attack,
            ScalingStat::MagicPower => stats.magic_power,
        }
    }
}

/// Resource cost validated before an action resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub resource: ResourceKind,
    pub amount: u32,
}

impl ResourceCost {
    pub fn mana(amount: u32) -> Self {
        Self {
            resource: ResourceKind::Mana,
            amount,
        }
    }

    pub fn stamina(amount: u32) -> Self {
        Self {
            resource: ResourceKind::Stamina,
            amount,
        }
    }
}

/// Status infliction carried by an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    pub kind: EffectKind,
    /// Infliction chance in percent, rolled after damage commits.
    pub chance: u32,
    pub turns: u32,
    pub intensity: u32,
    /// Lands on the actor instead of the target (wards, self-buffs).
    pub on_self: bool,
}

/// Numeric inputs for one pass through the strike pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionProfile {
    /// Percent of the scaling stat contributing to raw damage (100 = 1x).
    pub power: u32,
    /// Added to the computed hit chance.
    pub hit_mod: i32,
    /// Added to the effective crit chance.
    pub crit_mod: i32,
    pub cost: Option<ResourceCost>,
    pub damage_type: DamageType,
    pub scaling: ScalingStat,
    pub effect: Option<EffectSpec>,
}

impl ActionProfile {
    /// Plain physical profile, the baseline other profiles deviate from.
    pub fn physical(power: u32) -> Self {
        Self {
            power,
            hit_mod: 0,
            crit_mod: 0,
            cost: None,
            damage_type: DamageType::Physical,
            scaling: ScalingStat::Attack,
            effect: None,
        }
    }
}

/// How the resolver treats an action: every offensive variant funnels into
/// `Strike`, the rest are stance or utility moves.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionRoute {
    Strike(ActionProfile),
    Guard(Stance),
    /// Meditate: restore mana, no roll.
    Recover,
    /// Observe: reveal target info, no damage.
    Inspect,
    Escape,
    Pass,
    Consume(crate::state::ItemId),
}
