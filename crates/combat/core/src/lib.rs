//! Deterministic turn-based combat engine.
//!
//! `combat-core` defines the canonical combat rules: combatant state, stat
//! aggregation, the status-effect engine, the single resolution pipeline all
//! actions flow through, enemy behavior selection, and the player game state
//! machine. Everything here is pure and synchronous; randomness, content
//! lookup, and taming decisions come in through the oracle traits in [`env`],
//! so a recorded session replays identically. Session orchestration lives in
//! the `runtime` crate.
pub mod action;
pub mod behavior;
pub mod config;
pub mod env;
pub mod error;
pub mod resolve;
pub mod state;
pub mod stats;

pub use action::{ActionProfile, CombatAction, EffectSpec, PlayerCommand, ResourceCost};
pub use behavior::{BehaviorProfile, choose_action};
pub use config::EngineConfig;
pub use env::{
    ConsumableDefinition, Difficulty, EnemyFactory, Env, EquipmentDefinition, PassiveDefinition,
    PcgRng, RngOracle, SkillDefinition, StatBonus, StatCatalog, TameOutcome, TamingOracle,
};
pub use error::EngineError;
pub use resolve::{
    AppliedEffect, CombatResult, ResolveContext, RevealedInfo, RoundOutcome, RoundReport, resolve,
    resolve_round, resolve_tame,
};
pub use state::{
    Affinities, Affinity, Combatant, DamageType, EffectKind, EnemySnapshot, EnemyTemplateId,
    EntityId, GameState, ItemId, LootEntry, PassiveId, PlayerStateData, SkillId, Stance,
    StatusEffect, SyncCorrection, TickPhase, TickReport, tick,
};
pub use stats::{BaseStats, Bond, BondTier, ClassKind, EffectiveStats, ResourceKind, effective};
