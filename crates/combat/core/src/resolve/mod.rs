//! Combat resolution pipeline.
//!
//! Every action flows through [`resolve`] in the same step order: resource
//! check, control check, then the route-specific body. All offensive
//! variants share one strike pipeline parameterized by an
//! [`ActionProfile`]; nothing in here branches on which attack it is.

mod context;
mod outcome;
pub mod round;

pub use context::ResolveContext;
pub use outcome::{AppliedEffect, CombatResult, RevealedInfo, RoundOutcome, RoundReport};
pub use round::{resolve_round, resolve_tame};

use crate::action::{ActionProfile, ActionRoute, CombatAction, ResourceCost};
use crate::error::EngineError;
use crate::state::{Combatant, DamageType, EffectKind, Stance};
use crate::stats::{EffectiveStats, ResourceKind, effective};

/// Resolve one action by `actor` against `target`.
///
/// On success the combatants have been mutated (resources spent, damage
/// committed, statuses applied) and the result describes exactly what
/// happened. On error nothing was mutated.
pub fn resolve(
    actor: &mut Combatant,
    target: &mut Combatant,
    action: CombatAction,
    ctx: &mut ResolveContext<'_>,
) -> Result<CombatResult, EngineError> {
    ctx.begin_action();

    // A skill has to be known to its user before the catalog is consulted.
    if let CombatAction::Skill(id) = action
        && !actor.skills.contains(&id)
    {
        return Err(EngineError::UnknownSkill(id.0));
    }

    let route = action.route(ctx.catalog())?;

    // Resource check before anything mutates.
    if let ActionRoute::Strike(profile) = &route {
        check_affordable(actor, profile.cost)?;
    }

    // Item lookup fails fast for the same reason.
    let consumed = match &route {
        ActionRoute::Consume(item) => Some(
            ctx.catalog()
                .consumable(*item)
                .ok_or(EngineError::UnknownItem(item.0))?
                .clone(),
        ),
        _ => None,
    };

    // A declared stance covers exactly the opponent's next action; it lapses
    // the moment its owner acts again.
    actor.stance = Stance::None;

    // Control check: a stunned or frozen actor loses the round but keeps
    // the resources the chosen action would have spent.
    if let Some(kind) = actor.statuses.action_locked() {
        let mut result = CombatResult::scaffold(action);
        result.skipped = Some(kind);
        result.combo_after = actor.combo;
        return Ok(result);
    }

    let mut result = CombatResult::scaffold(action);

    match route {
        ActionRoute::Strike(profile) => {
            resolve_strike(actor, target, &profile, ctx, &mut result);
        }
        ActionRoute::Guard(stance) => {
            actor.stance = stance;
            // An explicit defend breaks the combo chain.
            actor.combo = 0;
        }
        ActionRoute::Recover => {
            let amount = actor.base.wisdom as u32 * ctx.config.meditate_wisdom_scale + actor.level;
            let gained = actor.mana.restore(amount);
            result.restored = Some((ResourceKind::Mana, gained));
        }
        ActionRoute::Inspect => {
            result.revealed = Some(RevealedInfo {
                hp_percent: target.hp.percent(),
                affinities: target.affinities.iter().copied().collect(),
            });
        }
        ActionRoute::Escape => {
            result.fled = Some(resolve_flee(actor, target, ctx));
        }
        ActionRoute::Pass => {}
        ActionRoute::Consume(_) => {
            // Looked up before any mutation.
            if let Some(def) = consumed {
                if let Some((resource, amount)) = def.restores {
                    let gained = match resource {
                        ResourceKind::Hp => actor.hp.restore(amount),
                        ResourceKind::Mana => actor.mana.restore(amount),
                        ResourceKind::Stamina => actor.stamina.restore(amount),
                    };
                    result.restored = Some((resource, gained));
                }
                if def.cures_damage_over_time {
                    actor.statuses.cure_damage_over_time();
                }
            }
        }
    }

    result.combo_after = actor.combo;
    result.actor_defeated = result.actor_defeated || actor.is_down(ctx.config);
    result.target_defeated = result.target_defeated || target.is_down(ctx.config);
    Ok(result)
}

fn check_affordable(actor: &Combatant, cost: Option<ResourceCost>) -> Result<(), EngineError> {
    let Some(cost) = cost else { return Ok(()) };
    let available = match cost.resource {
        ResourceKind::Hp => actor.hp.current,
        ResourceKind::Mana => actor.mana.current,
        ResourceKind::Stamina => actor.stamina.current,
    };
    if available < cost.amount {
        return Err(EngineError::InsufficientResource {
            resource: cost.resource,
            needed: cost.amount,
            available,
        });
    }
    Ok(())
}

fn spend(actor: &mut Combatant, cost: Option<ResourceCost>) {
    let Some(cost) = cost else { return };
    let meter = match cost.resource {
        ResourceKind::Hp => &mut actor.hp,
        ResourceKind::Mana => &mut actor.mana,
        ResourceKind::Stamina => &mut actor.stamina,
    };
    // Affordability was checked before any mutation.
    meter.spend(cost.amount);
}

/// The shared offensive pipeline: hit, crit, raw damage, type mitigation,
/// shield, defensive reactions, commit, infliction.
fn resolve_strike(
    actor: &mut Combatant,
    target: &mut Combatant,
    profile: &ActionProfile,
    ctx: &mut ResolveContext<'_>,
    result: &mut CombatResult,
) {
    let actor_stats = effective(actor, ctx.catalog(), ctx.config);
    let target_stats = effective(target, ctx.catalog(), ctx.config);

    spend(actor, profile.cost);
    result.damage_type = Some(profile.damage_type);

    // Pure wards (power 0) have nothing to land; they skip the to-hit roll.
    let offensive = profile.power > 0;

    if offensive {
        let hit_chance = (ctx.config.base_hit
            + (actor_stats.accuracy - target_stats.evasion) * ctx.config.hit_scale
            + profile.hit_mod)
            .clamp(ctx.config.min_hit, ctx.config.max_hit);

        if ctx.d100() as i32 > hit_chance {
            // A miss ends resolution and breaks the combo chain.
            actor.combo = 0;
            return;
        }
        result.hit = true;

        let crit_chance = (actor_stats.crit_chance + profile.crit_mod).clamp(0, 100);
        result.critical = ctx.d100() as i32 <= crit_chance;

        let mut damage = raw_damage(profile, &actor_stats, &target_stats, actor);
        if result.critical {
            damage = damage * actor_stats.crit_damage.max(100) as u32 / 100;
        }

        // Type mitigation. Immunity zeroes everything downstream.
        damage = damage * target.affinities.multiplier_percent(profile.damage_type) / 100;

        // An active shield soaks up to its intensity.
        if damage > 0
            && let Some(shield) = target.statuses.get(EffectKind::Shield)
        {
            damage = damage.saturating_sub(shield.intensity);
        }

        // Defensive reactions declared by the target last round.
        match target.stance {
            Stance::Block => damage /= 2,
            Stance::Dodge => {
                let dodge_chance = (ctx.config.dodge_base
                    + (target_stats.evasion - actor_stats.accuracy))
                    .clamp(5, 95);
                if ctx.d100() as i32 <= dodge_chance {
                    result.dodged = true;
                    damage = 0;
                }
            }
            Stance::Counter | Stance::None => {}
        }

        // Commit.
        if !result.dodged {
            actor.combo += 1;
        }
        result.damage = damage;
        if damage > 0 {
            target.hp.deplete(damage, ctx.config.death_floor);
            result.target_defeated = target.is_down(ctx.config);

            if target.stance == Stance::Counter {
                let reflected = damage * ctx.config.counter_percent / 100;
                if reflected > 0 {
                    actor.hp.deplete(reflected, ctx.config.death_floor);
                    result.counter_damage = reflected;
                    result.actor_defeated = actor.is_down(ctx.config);
                }
            }
        }
    } else {
        result.hit = true;
    }

    // Status infliction rides on the action profile.
    if let Some(effect) = profile.effect {
        let connects = effect.on_self || (result.hit && !result.dodged && !result.target_defeated);
        if connects && ctx.d100() <= effect.chance {
            let bearer = if effect.on_self { actor } else { &mut *target };
            if bearer
                .statuses
                .apply(effect.kind, effect.turns, effect.intensity)
            {
                result.effects_inflicted.push(AppliedEffect {
                    kind: effect.kind,
                    turns: effect.turns,
                    intensity: effect.intensity,
                    on_self: effect.on_self,
                });
            }
        }
    }
}

/// Raw pre-mitigation damage: scaled stat minus the matching defense,
/// floored at 1 so chip damage always lands on a successful hit.
fn raw_damage(
    profile: &ActionProfile,
    actor_stats: &EffectiveStats,
    target_stats: &EffectiveStats,
    actor: &Combatant,
) -> u32 {
    let scaled = profile.power as i32 * profile.scaling.value(actor_stats) / 100;
    let defense = match profile.damage_type {
        DamageType::Physical => target_stats.physical_defense,
        _ => target_stats.magic_resistance,
    };
    let mut raw = (scaled - defense).max(1) as u32;

    if let Some(empowered) = actor.statuses.get(EffectKind::Empowered) {
        raw = raw * (100 + empowered.intensity) / 100;
    }
    raw
}

/// Flee roll: base chance shifted by the speed differential, clamped.
fn resolve_flee(actor: &Combatant, target: &Combatant, ctx: &mut ResolveContext<'_>) -> bool {
    // Stances and statuses do not move flee odds; only speed does.
    let actor_speed = effective(actor, ctx.catalog(), ctx.config).speed;
    let target_speed = effective(target, ctx.catalog(), ctx.config).speed;
    let chance = (ctx.config.base_flee + (actor_speed - target_speed) / 2)
        .clamp(ctx.config.min_flee, ctx.config.max_flee);
    ctx.d100() as i32 <= chance
}
