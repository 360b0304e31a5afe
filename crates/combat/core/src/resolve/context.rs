//! Per-round resolution context: config, oracles, and roll bookkeeping.

use crate::config::EngineConfig;
use crate::env::{Env, StatCatalog, roll_seed};

/// Carries everything a resolution needs besides the combatants themselves.
///
/// Roll seeds are derived from `(session_seed, nonce, slot)`: the nonce
/// advances once per resolved action, the slot once per roll inside an
/// action, so every roll in a session is independent and replayable.
pub struct ResolveContext<'a> {
    pub config: &'a EngineConfig,
    env: Env<'a>,
    session_seed: u64,
    nonce: u64,
    slot: u32,
}

impl<'a> ResolveContext<'a> {
    pub fn new(config: &'a EngineConfig, env: Env<'a>, session_seed: u64, nonce: u64) -> Self {
        Self {
            config,
            env,
            session_seed,
            nonce,
            slot: 0,
        }
    }

    pub fn catalog(&self) -> &'a dyn StatCatalog {
        self.env.catalog()
    }

    /// Nonce to persist for the next round.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Start a new action: bump the nonce, reset the roll slot.
    pub(crate) fn begin_action(&mut self) {
        self.nonce += 1;
        self.slot = 0;
    }

    fn next_seed(&mut self) -> u64 {
        let seed = roll_seed(self.session_seed, self.nonce, self.slot);
        self.slot += 1;
        seed
    }

    /// Roll 1..=100.
    pub(crate) fn d100(&mut self) -> u32 {
        let seed = self.next_seed();
        self.env.rng().roll_d100(seed)
    }

    /// Roll 0..bound, for weighted tables.
    pub(crate) fn pick(&mut self, bound: u32) -> u32 {
        let seed = self.next_seed();
        self.env.rng().pick(seed, bound)
    }
}
