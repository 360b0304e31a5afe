//! Status effect list and the per-round tick engine.
//!
//! Effects count down in whole rounds. Re-applying a kind that is already
//! active refreshes it (longer duration, stronger intensity) instead of
//! stacking a second entry, so DOT output stays bounded.

use arrayvec::ArrayVec;
use strum::EnumIter;

use crate::config::EngineConfig;
use crate::state::Combatant;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    // Damage over time
    Bleed,
    Poison,
    Burn,
    // Control: the bearer's action is skipped
    Stun,
    Freeze,
    // Beneficial
    Regen,
    Shield,
    Empowered,
}

impl EffectKind {
    pub fn is_damage_over_time(self) -> bool {
        matches!(self, EffectKind::Bleed | EffectKind::Poison | EffectKind::Burn)
    }

    pub fn is_control(self) -> bool {
        matches!(self, EffectKind::Stun | EffectKind::Freeze)
    }

    pub fn is_beneficial(self) -> bool {
        matches!(
            self,
            EffectKind::Regen | EffectKind::Shield | EffectKind::Empowered
        )
    }
}

/// A single active effect.
///
/// `remaining_turns` is at least 1 while the effect is listed; the RoundEnd
/// tick that decrements it to 0 also removes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: EffectKind,
    pub remaining_turns: u32,
    pub intensity: u32,
}

/// Active status effects on one combatant, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { EngineConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Apply or refresh an effect.
    ///
    /// An already-active kind keeps one entry and takes the larger duration
    /// and the larger intensity. Returns false only when the list is full
    /// and the kind is new.
    pub fn apply(&mut self, kind: EffectKind, turns: u32, intensity: u32) -> bool {
        debug_assert!(turns > 0, "zero-duration effects are never listed");
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining_turns = existing.remaining_turns.max(turns);
            existing.intensity = existing.intensity.max(intensity);
            return true;
        }
        if self.effects.is_full() {
            return false;
        }
        self.effects.push(StatusEffect {
            kind,
            remaining_turns: turns,
            intensity,
        });
        true
    }

    pub fn remove(&mut self, kind: EffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Drop every damage-over-time effect (antidotes, bandages).
    pub fn cure_damage_over_time(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.kind.is_damage_over_time());
        before - self.effects.len()
    }

    /// Combat end discards everything.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// True when a control effect forces the bearer to skip its action.
    pub fn action_locked(&self) -> Option<EffectKind> {
        self.effects
            .iter()
            .find(|e| e.kind.is_control())
            .map(|e| e.kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Which half of the round a tick belongs to.
///
/// Both phases apply over-time HP changes; only RoundEnd counts durations
/// down and expires effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickPhase {
    RoundStart,
    RoundEnd,
}

/// One effect's contribution to a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEntry {
    pub kind: EffectKind,
    /// Negative for damage, positive for healing.
    pub hp_delta: i32,
    pub expired: bool,
}

/// Everything a single `tick` call did, observable immediately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub entries: Vec<TickEntry>,
    /// The bearer fell to the death floor during this tick.
    pub defeated: bool,
}

/// Run one tick phase over a combatant's effects.
///
/// DOT subtracts intensity from HP (clamped at the death floor, which counts
/// as defeat), Regen restores intensity capped at maximum. Shield and
/// Empowered do nothing here; the resolver reads them during mitigation.
pub fn tick(combatant: &mut Combatant, phase: TickPhase, config: &EngineConfig) -> TickReport {
    let mut report = TickReport::default();

    for effect in combatant.statuses.effects.iter_mut() {
        let mut entry = TickEntry {
            kind: effect.kind,
            hp_delta: 0,
            expired: false,
        };

        if effect.kind.is_damage_over_time() {
            let removed = combatant.hp.deplete(effect.intensity, config.death_floor);
            entry.hp_delta = -(removed as i32);
            if combatant.hp.current <= config.death_floor {
                report.defeated = true;
            }
        } else if effect.kind == EffectKind::Regen {
            entry.hp_delta = combatant.hp.restore(effect.intensity) as i32;
        }

        if phase == TickPhase::RoundEnd {
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            entry.expired = effect.remaining_turns == 0;
        }

        report.entries.push(entry);
    }

    if phase == TickPhase::RoundEnd {
        combatant.statuses.effects.retain(|e| e.remaining_turns > 0);
    }

    report
}
