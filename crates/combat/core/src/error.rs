//! Error taxonomy surfaced by the combat engine.
//!
//! Every condition here is local and recoverable: the caller gets a typed
//! error instead of a result, never both, never neither. Nothing in this
//! module is fatal to the process.
use thiserror::Error;

use crate::action::PlayerCommand;
use crate::state::machine::GameState;
use crate::stats::ResourceKind;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no combat is active for this session")]
    NotInCombat,

    #[error("{command} is not allowed while {state}")]
    ActionNotAllowed {
        state: GameState,
        command: PlayerCommand,
    },

    #[error("{resource} too low: need {needed}, have {available}")]
    InsufficientResource {
        resource: ResourceKind,
        needed: u32,
        available: u32,
    },

    #[error("unknown skill id {0}")]
    UnknownSkill(u32),

    #[error("unknown item id {0}")]
    UnknownItem(u32),
}
