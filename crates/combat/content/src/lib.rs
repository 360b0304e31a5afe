//! Table-backed content behind the engine's oracle traits.
//!
//! The engine only ever sees equipment, skills, passives, consumables, and
//! enemy templates through the read-only traits in `combat_core::env`. This
//! crate is the reference implementation of those traits: in-memory tables
//! filled either programmatically or from data files (RON for catalogs and
//! rosters, TOML for engine tuning) via the feature-gated [`loaders`].
//!
//! Content never appears in combat state; snapshots are materialized at
//! encounter start and handed to the engine by value.

pub mod catalog;
pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ContentCatalog;
pub use roster::{EnemyRoster, EnemyTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, RosterLoader, TuningLoader, TuningOverrides};
