//! Taming interface.
//!
//! The probability model behind taming is not the engine's business. The
//! session layer asks the oracle for an outcome before entering the
//! resolution critical section and feeds the result in, so the pipeline
//! itself never suspends on an external roll.

use crate::state::Combatant;
use crate::stats::Bond;

/// Already-computed result of a tame attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TameOutcome {
    /// The target joins the player; `bond` is its starting loyalty.
    Tamed { bond: Bond },
    /// The target shook it off and gets a free response.
    Resisted,
}

/// External collaborator deciding tame attempts.
pub trait TamingOracle: Send + Sync {
    fn attempt(&self, player: &Combatant, target: &Combatant) -> TameOutcome;
}
