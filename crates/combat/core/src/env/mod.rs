//! Read-only oracles required by the resolution pipeline.

mod catalog;
mod rng;
mod taming;

pub use catalog::{
    ConsumableDefinition, Difficulty, EnemyFactory, EquipmentDefinition, PassiveDefinition,
    SkillDefinition, StatBonus, StatCatalog,
};
pub use rng::{PcgRng, RngOracle, roll_seed};
pub use taming::{TameOutcome, TamingOracle};

/// Aggregates the oracles a single resolution needs.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    catalog: &'a dyn StatCatalog,
    rng: &'a dyn RngOracle,
}

impl<'a> Env<'a> {
    pub fn new(catalog: &'a dyn StatCatalog, rng: &'a dyn RngOracle) -> Self {
        Self { catalog, rng }
    }

    pub fn catalog(&self) -> &'a dyn StatCatalog {
        self.catalog
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

/// Stub oracles shared by unit tests across the crate (and downstream
/// integration tests).
pub mod testing {
    use std::sync::Mutex;

    use super::*;
    use crate::state::{ItemId, PassiveId, SkillId};

    /// Catalog that knows nothing. Aggregation over it is pure base + class.
    #[derive(Debug, Default)]
    pub struct EmptyCatalog;

    impl StatCatalog for EmptyCatalog {
        fn equipment(&self, _id: ItemId) -> Option<&EquipmentDefinition> {
            None
        }
        fn skill(&self, _id: SkillId) -> Option<&SkillDefinition> {
            None
        }
        fn passive(&self, _id: PassiveId) -> Option<&PassiveDefinition> {
            None
        }
        fn consumable(&self, _id: ItemId) -> Option<&ConsumableDefinition> {
            None
        }
    }

    /// RNG oracle with a scripted prefix.
    ///
    /// Queued values are returned verbatim from `next_u32` in order; once the
    /// queue runs dry, rolls fall back to [`PcgRng`] so long scenarios stay
    /// deterministic without scripting every roll.
    pub struct ScriptedRng {
        queue: Mutex<Vec<u32>>,
        fallback: PcgRng,
    }

    impl ScriptedRng {
        pub fn new(raw: Vec<u32>) -> Self {
            let mut queue = raw;
            queue.reverse();
            Self {
                queue: Mutex::new(queue),
                fallback: PcgRng,
            }
        }

        /// Script exact d100 outcomes (1..=100). `roll_d100` computes
        /// `next_u32 % 100 + 1`, so each value is stored as `value - 1`.
        pub fn force_d100(values: Vec<u32>) -> Self {
            Self::new(values.into_iter().map(|v| v.saturating_sub(1)).collect())
        }
    }

    impl RngOracle for ScriptedRng {
        fn next_u32(&self, seed: u64) -> u32 {
            let mut queue = self.queue.lock().expect("rng queue poisoned");
            match queue.pop() {
                Some(value) => value,
                None => self.fallback.next_u32(seed),
            }
        }
    }

}
