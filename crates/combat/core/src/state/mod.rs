//! Combatant state, status effects, affinities, and the game state machine.

mod affinity;
mod combatant;
mod enemy;
pub mod machine;
pub mod status;

pub use affinity::{Affinities, Affinity, DamageType};
pub use combatant::{
    Combatant, EnemyTemplateId, EntityId, ItemId, PassiveId, SkillId, Stance,
};
pub use enemy::{EnemySnapshot, LootEntry};
pub use machine::{GameState, PlayerStateData, SyncCorrection};
pub use status::{EffectKind, StatusEffect, StatusEffects, TickEntry, TickPhase, TickReport, tick};
