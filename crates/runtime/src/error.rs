//! Errors surfaced by the session runtime.
//!
//! Engine errors pass through unchanged; the runtime only adds the
//! transport-shaped failures of its own plumbing. Everything here is
//! recoverable and returned to the caller.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::EngineError;

use crate::types::PlayerId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no session is active for {0}")]
    NoActiveSession(PlayerId),

    #[error("{0} already has an active session")]
    SessionExists(PlayerId),

    #[error("{0} is already fighting something")]
    CombatAlreadyActive(PlayerId),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("session command channel closed")]
    CommandChannelClosed,

    #[error("session reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
