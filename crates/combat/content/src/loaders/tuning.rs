//! Engine tuning loader.
//!
//! Tuning files are partial: any knob left out keeps the engine default, so
//! a balance patch only states what it changes.

use std::path::Path;

use anyhow::Context;
use combat_core::config::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Partial overrides applied on top of [`EngineConfig::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningOverrides {
    pub base_hit: Option<i32>,
    pub min_hit: Option<i32>,
    pub max_hit: Option<i32>,
    pub hit_scale: Option<i32>,
    pub base_crit_damage: Option<u32>,
    pub base_flee: Option<i32>,
    pub min_flee: Option<i32>,
    pub max_flee: Option<i32>,
    pub counter_percent: Option<u32>,
    pub dodge_base: Option<i32>,
    pub death_floor: Option<u32>,
    pub meditate_wisdom_scale: Option<u32>,
}

impl TuningOverrides {
    pub fn apply(&self, config: &mut EngineConfig) {
        macro_rules! take {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = self.$field {
                    config.$field = value;
                })+
            };
        }
        take!(
            base_hit,
            min_hit,
            max_hit,
            hit_scale,
            base_crit_damage,
            base_flee,
            min_flee,
            max_flee,
            counter_percent,
            dodge_base,
            death_floor,
            meditate_wisdom_scale,
        );
    }
}

/// Loader for engine tuning from TOML files.
pub struct TuningLoader;

impl TuningLoader {
    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let overrides: TuningOverrides =
            toml::from_str(content).context("failed to parse tuning TOML")?;
        let mut config = EngineConfig::default();
        overrides.apply(&mut config);
        Ok(config)
    }

    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        Self::parse(&read_file(path)?)
            .with_context(|| format!("in tuning file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstated_knobs_keep_their_defaults() {
        let config = TuningLoader::parse("base_flee = 60\ncounter_percent = 30\n").unwrap();
        assert_eq!(config.base_flee, 60);
        assert_eq!(config.counter_percent, 30);
        assert_eq!(config.base_hit, EngineConfig::DEFAULT_BASE_HIT);
        assert_eq!(config.death_floor, 1);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        let config = TuningLoader::parse("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn malformed_input_carries_context() {
        let err = TuningLoader::parse("base_flee = \"fast\"").unwrap_err();
        assert!(format!("{err:#}").contains("tuning TOML"));
    }
}
