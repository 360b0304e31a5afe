//! Stat catalog loader.

use std::path::Path;

use anyhow::Context;
use combat_core::env::{
    ConsumableDefinition, EquipmentDefinition, PassiveDefinition, SkillDefinition,
};
use serde::{Deserialize, Serialize};

use crate::catalog::ContentCatalog;
use crate::loaders::{LoadResult, read_file};

/// Catalog file structure. Sections may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub equipment: Vec<EquipmentDefinition>,
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
    #[serde(default)]
    pub passives: Vec<PassiveDefinition>,
    #[serde(default)]
    pub consumables: Vec<ConsumableDefinition>,
}

/// Loader for the stat catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn parse(content: &str) -> LoadResult<ContentCatalog> {
        let data: CatalogData =
            ron::from_str(content).context("failed to parse catalog RON")?;

        let mut catalog = ContentCatalog::new();
        catalog.extend_equipment(data.equipment);
        catalog.extend_skills(data.skills);
        catalog.extend_passives(data.passives);
        catalog.extend_consumables(data.consumables);
        Ok(catalog)
    }

    pub fn load(path: &Path) -> LoadResult<ContentCatalog> {
        Self::parse(&read_file(path)?)
            .with_context(|| format!("in catalog file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::env::StatCatalog;
    use combat_core::state::{ItemId, SkillId};

    #[test]
    fn parses_a_full_catalog() {
        let catalog = CatalogLoader::parse(
            r#"(
                equipment: [
                    (
                        id: (1),
                        name: "iron sword",
                        bonuses: [(stat: Attack, bonus: Flat(10))],
                    ),
                ],
                skills: [
                    (
                        id: (5),
                        name: "fireball",
                        profile: (
                            power: 130,
                            hit_mod: 0,
                            crit_mod: 5,
                            cost: Some((resource: Mana, amount: 12)),
                            damage_type: Fire,
                            scaling: MagicPower,
                            effect: Some((
                                kind: Burn,
                                chance: 35,
                                turns: 3,
                                intensity: 4,
                                on_self: false,
                            )),
                        ),
                    ),
                ],
                consumables: [
                    (
                        id: (20),
                        name: "minor potion",
                        restores: Some((Hp, 25)),
                        cures_damage_over_time: false,
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.equipment(ItemId(1)).unwrap().name, "iron sword");
        let fireball = catalog.skill(SkillId(5)).unwrap();
        assert_eq!(fireball.profile.power, 130);
        assert!(fireball.profile.effect.is_some());
        assert!(catalog.consumable(ItemId(20)).is_some());
    }

    #[test]
    fn omitted_sections_default_to_empty() {
        let catalog = CatalogLoader::parse("(equipment: [])").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_input_carries_context() {
        let err = CatalogLoader::parse("(equipment: 12)").unwrap_err();
        assert!(format!("{err:#}").contains("catalog RON"));
    }
}
