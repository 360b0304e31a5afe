//! Enemy templates and the snapshot factory.

use std::collections::HashMap;

use combat_core::behavior::BehaviorProfile;
use combat_core::env::{Difficulty, EnemyFactory};
use combat_core::state::{
    Affinity, Combatant, DamageType, EnemySnapshot, EnemyTemplateId, EntityId, LootEntry,
};
use combat_core::stats::{BaseStats, ClassKind};

/// Authored enemy archetype, written at level 1.
///
/// The roster scales a template up (or down) to the encounter level at spawn
/// time; the engine itself never rescales a snapshot it was handed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyTemplateId,
    pub name: String,
    pub class: ClassKind,
    pub base: BaseStats,
    pub behavior: BehaviorProfile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affinities: Vec<(DamageType, Affinity)>,
    pub xp_per_level: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<LootEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tameable: bool,
}

/// Template table implementing the engine's enemy factory.
#[derive(Clone, Debug, Default)]
pub struct EnemyRoster {
    templates: HashMap<EnemyTemplateId, EnemyTemplate>,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: EnemyTemplate) -> Self {
        self.templates.insert(template.id, template);
        self
    }

    pub fn extend(&mut self, templates: impl IntoIterator<Item = EnemyTemplate>) {
        self.templates
            .extend(templates.into_iter().map(|t| (t.id, t)));
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Encounter level relative to the player.
fn level_offset(difficulty: Difficulty) -> i32 {
    match difficulty {
        Difficulty::Easy => -2,
        Difficulty::Normal => 0,
        Difficulty::Hard => 2,
    }
}

/// HP and reward scale per difficulty, in percent.
fn power_percent(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 80,
        Difficulty::Normal => 100,
        Difficulty::Hard => 120,
    }
}

impl EnemyFactory for EnemyRoster {
    fn spawn(
        &self,
        template: EnemyTemplateId,
        player_level: u32,
        difficulty: Difficulty,
    ) -> Option<EnemySnapshot> {
        let template = self.templates.get(&template)?;

        let level = (player_level as i32 + level_offset(difficulty)).max(1) as u32;

        // Grow the level-1 template along its class's growth attributes.
        let mut base = template.base;
        for _ in 1..level {
            for attribute in template.class.growth_attributes() {
                base.raise(attribute);
            }
        }

        let mut combatant = Combatant::new(
            EntityId(template.id.0),
            template.name.clone(),
            template.class,
            level,
            base,
        );
        for (damage_type, affinity) in &template.affinities {
            combatant.affinities.set(*damage_type, *affinity);
        }

        let scale = power_percent(difficulty);
        let hp_max = (combatant.hp.maximum * scale / 100).max(1);
        combatant.resize_meters(hp_max, combatant.mana.maximum, combatant.stamina.maximum);
        combatant.hp.restore(hp_max);

        let xp = template.xp_per_level * level as u64 * scale as u64 / 100;

        let mut snapshot =
            EnemySnapshot::new(combatant, template.behavior).with_rewards(xp, template.loot.clone());
        if template.tameable {
            snapshot = snapshot.tameable();
        }
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::state::ItemId;

    fn wolf() -> EnemyTemplate {
        EnemyTemplate {
            id: EnemyTemplateId(3),
            name: "gray wolf".into(),
            class: ClassKind::Rogue,
            base: BaseStats::even(8),
            behavior: BehaviorProfile::Aggressive,
            affinities: vec![(DamageType::Cold, Affinity::Resistant(30))],
            xp_per_level: 25,
            loot: vec![LootEntry {
                item: ItemId(40),
                chance: 60,
            }],
            tameable: true,
        }
    }

    #[test]
    fn unknown_template_yields_nothing() {
        let roster = EnemyRoster::new();
        assert!(
            roster
                .spawn(EnemyTemplateId(99), 5, Difficulty::Normal)
                .is_none()
        );
    }

    #[test]
    fn spawn_tracks_player_level_and_difficulty() {
        let roster = EnemyRoster::new().with_template(wolf());

        let normal = roster.spawn(EnemyTemplateId(3), 5, Difficulty::Normal).unwrap();
        let easy = roster.spawn(EnemyTemplateId(3), 5, Difficulty::Easy).unwrap();
        let hard = roster.spawn(EnemyTemplateId(3), 5, Difficulty::Hard).unwrap();

        assert_eq!(normal.combatant.level, 5);
        assert_eq!(easy.combatant.level, 3);
        assert_eq!(hard.combatant.level, 7);
        assert!(hard.combatant.hp.maximum > normal.combatant.hp.maximum);
        assert!(easy.combatant.hp.maximum < normal.combatant.hp.maximum);
        assert!(hard.xp_reward > normal.xp_reward);
    }

    #[test]
    fn spawn_never_drops_below_level_one() {
        let roster = EnemyRoster::new().with_template(wolf());
        let snapshot = roster.spawn(EnemyTemplateId(3), 1, Difficulty::Easy).unwrap();
        assert_eq!(snapshot.combatant.level, 1);
    }

    #[test]
    fn template_affinities_and_flags_carry_over() {
        let roster = EnemyRoster::new().with_template(wolf());
        let snapshot = roster.spawn(EnemyTemplateId(3), 4, Difficulty::Normal).unwrap();

        assert_eq!(
            snapshot.combatant.affinities.get(DamageType::Cold),
            Some(Affinity::Resistant(30))
        );
        assert!(snapshot.tameable);
        assert!(!snapshot.dungeon);
        assert_eq!(snapshot.loot.len(), 1);
    }

    #[test]
    fn growth_follows_the_class() {
        let roster = EnemyRoster::new().with_template(wolf());
        let snapshot = roster.spawn(EnemyTemplateId(3), 6, Difficulty::Normal).unwrap();
        // Rogue growth: agility and strength, one point per level past 1.
        assert_eq!(snapshot.combatant.base.agility, 13);
        assert_eq!(snapshot.combatant.base.strength, 13);
        assert_eq!(snapshot.combatant.base.wisdom, 8);
    }
}
