//! Enemy behavior selection.
//!
//! Each profile is a weighted action table modulated by live HP and resource
//! thresholds. Selection rolls through the RNG oracle so an enemy's choices
//! replay with the session. The selector reads both combatants and never
//! mutates either; its output feeds straight back into the resolution
//! pipeline.

use strum::EnumIter;

use crate::action::{ActionRoute, CombatAction};
use crate::resolve::ResolveContext;
use crate::state::Combatant;
use crate::stats::ResourceKind;

/// HP percent under which self-preservation kicks in.
const LOW_HP: u32 = 30;
/// Mana percent under which Supportive enemies recover instead of casting.
const LOW_MANA: u32 = 30;
/// Weight multiplier for threshold-favored table entries.
const FAVORED: u32 = 4;

/// Temperament attached to an enemy snapshot at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorProfile {
    Passive,
    Defensive,
    Balanced,
    Aggressive,
    Berserker,
    Intelligent,
    Coward,
    Supportive,
}

impl BehaviorProfile {
    /// Base weighted action table, before threshold modulation.
    fn table(self) -> &'static [(CombatAction, u32)] {
        use CombatAction::*;
        match self {
            BehaviorProfile::Passive => &[(Wait, 4), (Observe, 2), (Block, 2), (PhysicalAttack, 1)],
            BehaviorProfile::Defensive => &[
                (Block, 3),
                (Counter, 2),
                (Dodge, 2),
                (PhysicalAttack, 2),
                (PreciseAttack, 1),
            ],
            BehaviorProfile::Balanced => &[
                (PhysicalAttack, 3),
                (PreciseAttack, 2),
                (Block, 2),
                (ChargeAttack, 1),
                (Dodge, 1),
                (HeavyAttack, 1),
            ],
            BehaviorProfile::Aggressive => &[
                (PhysicalAttack, 3),
                (ChargeAttack, 3),
                (HeavyAttack, 2),
                (PreciseAttack, 2),
            ],
            // Berserkers never reach the table; they always take the
            // heaviest swing they can pay for.
            BehaviorProfile::Berserker => &[(HeavyAttack, 1)],
            BehaviorProfile::Intelligent => &[
                (PreciseAttack, 3),
                (PhysicalAttack, 2),
                (Dodge, 1),
                (Counter, 1),
            ],
            BehaviorProfile::Coward => &[
                (Dodge, 3),
                (PhysicalAttack, 2),
                (Block, 2),
                (Flee, 1),
            ],
            BehaviorProfile::Supportive => &[
                (MagicalAttack, 3),
                (Meditate, 2),
                (Block, 2),
                (Observe, 1),
            ],
        }
    }
}

/// Choose the enemy's response action for this round.
pub fn choose_action(
    enemy: &Combatant,
    player: &Combatant,
    profile: BehaviorProfile,
    ctx: &mut ResolveContext<'_>,
) -> CombatAction {
    let own_hp = enemy.hp.percent();
    let player_hp = player.hp.percent();

    // Hard threshold switches bypass the table entirely.
    match profile {
        BehaviorProfile::Coward if own_hp < LOW_HP => return CombatAction::Flee,
        BehaviorProfile::Berserker => return strongest_attack(enemy, ctx),
        BehaviorProfile::Supportive
            if enemy.mana.percent() < LOW_MANA && !enemy.mana.is_full() =>
        {
            return CombatAction::Meditate;
        }
        _ => {}
    }

    let mut weights: Vec<(CombatAction, u32)> = profile.table().to_vec();

    // Intelligent enemies read the board: guard when hurt, press when the
    // player is hurting.
    if profile == BehaviorProfile::Intelligent {
        if own_hp < LOW_HP {
            favor(&mut weights, |a| {
                matches!(a, CombatAction::Block | CombatAction::Dodge | CombatAction::Counter)
            });
        }
        if player_hp < LOW_HP {
            favor(&mut weights, |a| {
                matches!(a, CombatAction::PhysicalAttack | CombatAction::PreciseAttack)
            });
        }
    }

    // An entry the enemy cannot pay for is off the table this round.
    weights.retain(|(action, _)| affordable(enemy, *action, ctx));

    weighted_pick(&weights, ctx).unwrap_or(CombatAction::PhysicalAttack)
}

fn favor(weights: &mut [(CombatAction, u32)], pick: impl Fn(CombatAction) -> bool) {
    for (action, weight) in weights.iter_mut() {
        if pick(*action) {
            *weight *= FAVORED;
        }
    }
}

/// Highest-power attack the enemy can pay for. Plain attacks are free, so
/// this always lands on something.
fn strongest_attack(enemy: &Combatant, ctx: &ResolveContext<'_>) -> CombatAction {
    [
        CombatAction::HeavyAttack,
        CombatAction::ChargeAttack,
        CombatAction::PhysicalAttack,
    ]
    .into_iter()
    .find(|action| affordable(enemy, *action, ctx))
    .unwrap_or(CombatAction::PhysicalAttack)
}

fn affordable(enemy: &Combatant, action: CombatAction, ctx: &ResolveContext<'_>) -> bool {
    match action.route(ctx.catalog()) {
        Ok(ActionRoute::Strike(profile)) => match profile.cost {
            Some(cost) => {
                let available = match cost.resource {
                    ResourceKind::Hp => enemy.hp.current,
                    ResourceKind::Mana => enemy.mana.current,
                    ResourceKind::Stamina => enemy.stamina.current,
                };
                available >= cost.amount
            }
            None => true,
        },
        Ok(_) => true,
        Err(_) => false,
    }
}

fn weighted_pick(
    weights: &[(CombatAction, u32)],
    ctx: &mut ResolveContext<'_>,
) -> Option<CombatAction> {
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = ctx.pick(total);
    for (action, weight) in weights {
        if roll < *weight {
            return Some(*action);
        }
        roll -= weight;
    }
    None
}
