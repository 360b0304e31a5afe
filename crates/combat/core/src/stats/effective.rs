//! Stat aggregation: from base attributes to effective combat stats.
//!
//! `effective()` is a pure function and is recomputed whenever the resolver
//! needs numbers, never cached, since equipment and passives can change
//! between rounds. Unknown equipment or passive ids contribute nothing; a
//! stale id in a player record is a content problem, not an engine failure.

use strum::IntoEnumIterator;

use super::bonus::{BonusStack, StatBounds};
use crate::config::EngineConfig;
use crate::env::StatCatalog;
use crate::state::Combatant;

/// Derived stats the resolution pipeline reads.
///
/// Not stored on the combatant; always recomputed from base attributes,
/// class, equipment, passives, and (for pets) bond.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub attack: i32,
    pub magic_power: i32,
    pub physical_defense: i32,
    pub magic_resistance: i32,
    pub accuracy: i32,
    pub evasion: i32,
    pub speed: i32,
    pub crit_chance: i32,
    /// Crit damage multiplier in percent (200 = double damage).
    pub crit_damage: i32,
    pub hp_max: i32,
    pub mana_max: i32,
    pub stamina_max: i32,
}

/// Identifies one aggregated stat. Used by bonus tables in catalogs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Attack,
    MagicPower,
    PhysicalDefense,
    MagicResistance,
    Accuracy,
    Evasion,
    Speed,
    CritChance,
    CritDamage,
    HpMax,
    ManaMax,
    StaminaMax,
}

impl StatKind {
    fn bounds(self) -> StatBounds {
        match self {
            StatKind::HpMax | StatKind::ManaMax | StatKind::StaminaMax => StatBounds::RESOURCES,
            _ => StatBounds::DERIVED,
        }
    }

    /// Base formula before any bonuses. Integer math, same inputs same
    /// outputs. Crit damage starts from the tuned multiplier; everything
    /// else derives from attributes and level.
    fn base_value(self, c: &Combatant, config: &EngineConfig) -> i32 {
        let b = &c.base;
        let level = c.level as i32;
        match self {
            StatKind::Attack => (b.strength * 15) / 10 + level,
            StatKind::MagicPower => (b.intellect * 14) / 10 + (b.wisdom * 4) / 10 + level,
            StatKind::PhysicalDefense => b.vitality + level / 2,
            StatKind::MagicResistance => b.wisdom + (b.vitality * 3) / 10,
            StatKind::Accuracy => b.agility + b.presence / 4,
            StatKind::Evasion => (b.agility * 6) / 10,
            StatKind::Speed => 90 + b.agility,
            StatKind::CritChance => 5 + b.agility / 4,
            StatKind::CritDamage => config.base_crit_damage as i32,
            StatKind::HpMax => 50 + b.vitality * 12 + level * 8,
            StatKind::ManaMax => 20 + b.intellect * 10 + b.wisdom * 4,
            StatKind::StaminaMax => 30 + b.vitality * 5 + b.agility * 5,
        }
    }

    /// Whether a pet's bond multiplier touches this stat.
    fn bond_scaled(self) -> bool {
        matches!(
            self,
            StatKind::Attack | StatKind::PhysicalDefense | StatKind::MagicResistance
        )
    }
}

/// Compute one combatant's effective stats against a catalog and the
/// engine's tuning.
pub fn effective(
    c: &Combatant,
    catalog: &dyn StatCatalog,
    config: &EngineConfig,
) -> EffectiveStats {
    let mut out = EffectiveStats {
        attack: 0,
        magic_power: 0,
        physical_defense: 0,
        magic_resistance: 0,
        accuracy: 0,
        evasion: 0,
        speed: 0,
        crit_chance: 0,
        crit_damage: 0,
        hp_max: 0,
        mana_max: 0,
        stamina_max: 0,
    };

    for stat in StatKind::iter() {
        let mut stack = BonusStack::new();
        stack.extend(c.class.bonuses(stat).iter().copied());

        for item in &c.equipment {
            // Tolerant lookup: an id the catalog does not know adds zero.
            if let Some(def) = catalog.equipment(*item) {
                stack.extend(def.bonuses_for(stat));
            }
        }
        for passive in &c.passives {
            if let Some(def) = catalog.passive(*passive) {
                stack.extend(def.bonuses_for(stat));
            }
        }

        let mut value = stack.apply(stat.base_value(c, config), stat.bounds());

        // Bond multiplies after all additive bonuses, pets only.
        if stat.bond_scaled()
            && let Some(bond) = c.bond
        {
            value = (value * (100 + bond.combat_percent())) / 100;
            value = value.clamp(stat.bounds().min, stat.bounds().max);
        }

        match stat {
            StatKind::Attack => out.attack = value,
            StatKind::MagicPower => out.magic_power = value,
            StatKind::PhysicalDefense => out.physical_defense = value,
            StatKind::MagicResistance => out.magic_resistance = value,
            StatKind::Accuracy => out.accuracy = value,
            StatKind::Evasion => out.evasion = value,
            StatKind::Speed => out.speed = value,
            StatKind::CritChance => out.crit_chance = value,
            StatKind::CritDamage => out.crit_damage = value,
            StatKind::HpMax => out.hp_max = value,
            StatKind::ManaMax => out.mana_max = value,
            StatKind::StaminaMax => out.stamina_max = value,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EquipmentDefinition, StatBonus};
    use crate::state::{Combatant, EntityId, ItemId};
    use crate::stats::{BaseStats, Bonus, Bond, ClassKind};
    use std::collections::HashMap;

    struct MapCatalog {
        equipment: HashMap<ItemId, EquipmentDefinition>,
    }

    impl StatCatalog for MapCatalog {
        fn equipment(&self, id: ItemId) -> Option<&EquipmentDefinition> {
            self.equipment.get(&id)
        }
        fn skill(&self, _id: crate::state::SkillId) -> Option<&crate::env::SkillDefinition> {
            None
        }
        fn passive(&self, _id: crate::state::PassiveId) -> Option<&crate::env::PassiveDefinition> {
            None
        }
        fn consumable(&self, _id: ItemId) -> Option<&crate::env::ConsumableDefinition> {
            None
        }
    }

    fn bare_catalog() -> MapCatalog {
        MapCatalog {
            equipment: HashMap::new(),
        }
    }

    fn recruit() -> Combatant {
        Combatant::new(
            EntityId(1),
            "recruit",
            ClassKind::Ranger,
            1,
            BaseStats::even(10),
        )
    }

    #[test]
    fn base_formulas_for_even_recruit() {
        let c = recruit();
        let stats = effective(&c, &bare_catalog(), &EngineConfig::default());
        // strength 10 -> 15, +1 level
        assert_eq!(stats.attack, 16);
        assert_eq!(stats.evasion, 6);
        // Ranger: +10 flat accuracy on base 10 + 10/4
        assert_eq!(stats.accuracy, 22);
        assert_eq!(stats.crit_damage, 200);
        assert_eq!(stats.hp_max, 50 + 120 + 8);
    }

    #[test]
    fn unknown_equipment_contributes_zero() {
        let config = EngineConfig::default();
        let mut c = recruit();
        c.equipment.push(ItemId(999));
        let with_ghost = effective(&c, &bare_catalog(), &config);
        c.equipment.clear();
        let without = effective(&c, &bare_catalog(), &config);
        assert_eq!(with_ghost, without);
    }

    #[test]
    fn equipment_flat_applies_before_passive_percent() {
        let mut equipment = HashMap::new();
        equipment.insert(
            ItemId(1),
            EquipmentDefinition {
                id: ItemId(1),
                name: "iron sword".into(),
                bonuses: vec![StatBonus {
                    stat: StatKind::Attack,
                    bonus: Bonus::Flat(10),
                }],
            },
        );
        let catalog = MapCatalog { equipment };

        let mut c = recruit();
        c.equipment.push(ItemId(1));
        let stats = effective(&c, &catalog, &EngineConfig::default());
        assert_eq!(stats.attack, 26);
    }

    #[test]
    fn bond_multiplies_after_additive_bonuses() {
        let mut pet = recruit();
        pet.bond = Some(Bond::new(1000)); // Devoted, +35%
        let stats = effective(&pet, &bare_catalog(), &EngineConfig::default());
        assert_eq!(stats.attack, 16 * 135 / 100);
        // Accuracy is not bond scaled.
        assert_eq!(stats.accuracy, 22);
    }

    #[test]
    fn hostile_bond_penalizes() {
        let mut pet = recruit();
        pet.bond = Some(Bond::new(0)); // Hostile, -25%
        let stats = effective(&pet, &bare_catalog(), &EngineConfig::default());
        assert_eq!(stats.attack, 16 * 75 / 100);
    }

    #[test]
    fn crit_damage_base_follows_the_tuning() {
        let c = recruit();
        let mut config = EngineConfig::default();
        assert_eq!(
            effective(&c, &bare_catalog(), &config).crit_damage,
            EngineConfig::DEFAULT_CRIT_DAMAGE as i32
        );

        config.base_crit_damage = 300;
        assert_eq!(effective(&c, &bare_catalog(), &config).crit_damage, 300);
    }
}
