//! Enemy roster loader.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::roster::{EnemyRoster, EnemyTemplate};

/// Roster file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterData {
    pub templates: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn parse(content: &str) -> LoadResult<EnemyRoster> {
        let data: RosterData = ron::from_str(content).context("failed to parse roster RON")?;
        let mut roster = EnemyRoster::new();
        roster.extend(data.templates);
        Ok(roster)
    }

    pub fn load(path: &Path) -> LoadResult<EnemyRoster> {
        Self::parse(&read_file(path)?)
            .with_context(|| format!("in roster file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::env::{Difficulty, EnemyFactory};
    use combat_core::state::EnemyTemplateId;

    #[test]
    fn parses_templates_with_defaults() {
        let roster = RosterLoader::parse(
            r#"(
                templates: [
                    (
                        id: (1),
                        name: "cave bat",
                        class: Rogue,
                        base: (
                            strength: 4,
                            intellect: 2,
                            agility: 12,
                            vitality: 3,
                            wisdom: 2,
                            presence: 2,
                        ),
                        behavior: Coward,
                        xp_per_level: 10,
                        tameable: true,
                    ),
                    (
                        id: (2),
                        name: "stone golem",
                        class: Warrior,
                        base: (
                            strength: 14,
                            intellect: 1,
                            agility: 2,
                            vitality: 16,
                            wisdom: 4,
                            presence: 1,
                        ),
                        behavior: Defensive,
                        affinities: [(Physical, Resistant(40)), (Poison, Immune)],
                        xp_per_level: 40,
                        loot: [(item: (12), chance: 80)],
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(roster.len(), 2);
        let bat = roster.spawn(EnemyTemplateId(1), 1, Difficulty::Normal).unwrap();
        assert!(bat.tameable);
        assert!(bat.loot.is_empty());
        let golem = roster.spawn(EnemyTemplateId(2), 1, Difficulty::Normal).unwrap();
        assert!(!golem.tameable);
        assert_eq!(golem.loot.len(), 1);
    }

    #[test]
    fn malformed_input_carries_context() {
        let err = RosterLoader::parse("(templates: {})").unwrap_err();
        assert!(format!("{err:#}").contains("roster RON"));
    }
}
