//! Data-file loaders.
//!
//! Catalogs and rosters are authored in RON, engine tuning overrides in
//! TOML. Every loader has a `parse` that works on a string (used by tests)
//! and a `load` that reads a file and attaches path context to failures.

pub mod catalog;
pub mod roster;
pub mod tuning;

pub use catalog::CatalogLoader;
pub use roster::RosterLoader;
pub use tuning::{TuningLoader, TuningOverrides};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
