//! Round orchestration.
//!
//! One submitted player action drives a full round: the player's resolution,
//! the enemy's status tick, the enemy's chosen response, and the player's
//! status tick, in that order. The player always resolves first, and nothing
//! further resolves once either side is down. Victory rolls experience,
//! level-ups, and loot before the report leaves the crate.

use super::{CombatResult, ResolveContext, RoundOutcome, RoundReport, resolve};
use crate::action::CombatAction;
use crate::behavior::choose_action;
use crate::env::TameOutcome;
use crate::error::EngineError;
use crate::state::{Combatant, EnemySnapshot, ItemId, TickPhase, tick};
use crate::stats::effective;

/// Resolve one full round around the player's chosen action.
///
/// The snapshot's combatant and the player are both mutated in place. A
/// terminal outcome (`Victory`, `Defeat`, `Fled`, `Tamed`) means the round
/// ended the encounter; the caller owns the state transition that follows.
/// `Fled` covers either side escaping; the per-side results in the report
/// say which one ran.
pub fn resolve_round(
    player: &mut Combatant,
    enemy: &mut EnemySnapshot,
    action: CombatAction,
    ctx: &mut ResolveContext<'_>,
) -> Result<RoundReport, EngineError> {
    let player_result = resolve(player, &mut enemy.combatant, action, ctx)?;
    let mut report = RoundReport::new(player_result);

    if report.player.fled == Some(true) {
        player.leave_combat();
        report.outcome = RoundOutcome::Fled;
        return Ok(report);
    }
    if report.player.target_defeated {
        report.outcome = victory(player, enemy, ctx);
        return Ok(report);
    }
    if report.player.actor_defeated {
        // A counter took the player down on their own swing.
        player.leave_combat();
        report.outcome = RoundOutcome::Defeat;
        return Ok(report);
    }

    enemy_response(player, enemy, &mut report, ctx)?;
    Ok(report)
}

/// Resolve a tame attempt whose outcome the session layer already obtained
/// from the taming oracle.
///
/// The attempt consumed the player's round, but there is no pipeline action
/// behind it, so the report carries an empty `Wait` result for the player.
/// Success ends the encounter; resistance hands the enemy a free response,
/// exactly like a failed flee.
pub fn resolve_tame(
    player: &mut Combatant,
    enemy: &mut EnemySnapshot,
    outcome: TameOutcome,
    ctx: &mut ResolveContext<'_>,
) -> Result<RoundReport, EngineError> {
    let mut report = RoundReport::new(CombatResult::scaffold(CombatAction::Wait));

    match outcome {
        TameOutcome::Tamed { bond } => {
            player.leave_combat();
            report.outcome = RoundOutcome::Tamed { bond };
        }
        TameOutcome::Resisted => {
            enemy_response(player, enemy, &mut report, ctx)?;
        }
    }
    Ok(report)
}

/// The back half of a round: enemy tick, enemy action, player tick.
fn enemy_response(
    player: &mut Combatant,
    enemy: &mut EnemySnapshot,
    report: &mut RoundReport,
    ctx: &mut ResolveContext<'_>,
) -> Result<(), EngineError> {
    report.enemy_tick = tick(&mut enemy.combatant, TickPhase::RoundEnd, ctx.config);
    if report.enemy_tick.defeated {
        report.outcome = victory(player, enemy, ctx);
        return Ok(());
    }

    let enemy_action = choose_action(&enemy.combatant, player, enemy.behavior, ctx);
    report.enemy_action = Some(enemy_action);
    let enemy_result = match resolve(&mut enemy.combatant, player, enemy_action, ctx) {
        Ok(result) => result,
        // The selector only picks affordable actions, but the pool it read
        // can shift underneath it; the enemy loses its response then.
        Err(EngineError::InsufficientResource { .. }) => {
            resolve(&mut enemy.combatant, player, CombatAction::Wait, ctx)?
        }
        Err(other) => return Err(other),
    };

    let enemy_fled = enemy_result.fled == Some(true);
    let player_down = enemy_result.target_defeated;
    let enemy_down = enemy_result.actor_defeated;
    report.enemy = Some(enemy_result);

    if enemy_fled {
        player.leave_combat();
        report.outcome = RoundOutcome::Fled;
        return Ok(());
    }
    if player_down {
        player.leave_combat();
        report.outcome = RoundOutcome::Defeat;
        return Ok(());
    }
    if enemy_down {
        report.outcome = victory(player, enemy, ctx);
        return Ok(());
    }

    report.player_tick = tick(player, TickPhase::RoundEnd, ctx.config);
    if report.player_tick.defeated {
        player.leave_combat();
        report.outcome = RoundOutcome::Defeat;
    }
    Ok(())
}

/// Close out a won encounter: experience, level-ups, loot.
fn victory(
    player: &mut Combatant,
    enemy: &EnemySnapshot,
    ctx: &mut ResolveContext<'_>,
) -> RoundOutcome {
    player.leave_combat();

    let xp = enemy.xp_reward;
    player.experience += xp;
    let levels_gained = apply_level_ups(player, ctx);

    let loot: Vec<ItemId> = enemy
        .loot
        .iter()
        .filter(|entry| ctx.d100() <= entry.chance)
        .map(|entry| entry.item)
        .collect();

    RoundOutcome::Victory {
        xp,
        levels_gained,
        loot,
    }
}

/// Total experience required to hold `level`. Triangular curve: each level
/// costs 100 more than the one before it.
pub fn xp_to_reach(level: u32) -> u64 {
    let l = level as u64;
    50 * l.saturating_sub(1) * l
}

fn apply_level_ups(player: &mut Combatant, ctx: &ResolveContext<'_>) -> u32 {
    let mut gained = 0;
    while player.experience >= xp_to_reach(player.level + 1) {
        player.level += 1;
        gained += 1;
        for attribute in player.class.growth_attributes() {
            player.base.raise(attribute);
        }
    }

    if gained > 0 {
        // Meters grow to the new aggregated maxima and refill.
        let stats = effective(player, ctx.catalog(), ctx.config);
        player.hp.grow_to(stats.hp_max as u32);
        player.mana.grow_to(stats.mana_max as u32);
        player.stamina.grow_to(stats.stamina_max as u32);
    }
    gained
}
