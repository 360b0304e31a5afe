//! Shared runtime-facing types.

use core::fmt;

use combat_core::{GameState, RoundReport};

/// Identity of one player session.
///
/// Sessions are fully independent; the id is whatever the chat transport
/// keys its users by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Why a combat session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Victory,
    Defeat,
    Fled,
    Tamed,
    Disconnect,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EndReason::Victory => "victory",
            EndReason::Defeat => "defeat",
            EndReason::Fled => "fled",
            EndReason::Tamed => "tamed",
            EndReason::Disconnect => "disconnect",
        };
        write!(f, "{}", label)
    }
}

/// What one submitted command produced.
///
/// Every submission yields exactly one of these or a typed error, never
/// both, never neither.
#[derive(Clone, Debug)]
pub enum ActionOutcome {
    /// A combat action (or tame attempt) resolved a full round.
    Round(Box<RoundReport>),
    /// A menu or idle command was accepted; the session now sits in `state`.
    Transitioned(GameState),
}
