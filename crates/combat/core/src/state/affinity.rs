//! Damage types and per-combatant affinities.

use arrayvec::ArrayVec;
use strum::EnumIter;

use crate::config::EngineConfig;

/// Damage types carried by actions and skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
    Poison,
    Arcane,
}

/// One combatant's relationship to a damage type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Affinity {
    /// Takes no damage of this type, ever.
    Immune,
    /// Takes extra damage; stored as bonus percent (50 = x1.5).
    Weak(u32),
    /// Takes reduced damage; stored as reduction percent (30 = x0.7).
    Resistant(u32),
}

/// Sparse affinity table, at most one entry per damage type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affinities {
    entries: ArrayVec<(DamageType, Affinity), { EngineConfig::MAX_AFFINITIES }>,
}

impl Affinities {
    pub fn none() -> Self {
        Self::default()
    }

    /// Set or replace the affinity for a damage type.
    pub fn set(&mut self, damage_type: DamageType, affinity: Affinity) {
        if let Some(entry) = self.entries.iter_mut().find(|(d, _)| *d == damage_type) {
            entry.1 = affinity;
            return;
        }
        if !self.entries.is_full() {
            self.entries.push((damage_type, affinity));
        }
    }

    pub fn get(&self, damage_type: DamageType) -> Option<Affinity> {
        self.entries
            .iter()
            .find(|(d, _)| *d == damage_type)
            .map(|(_, a)| *a)
    }

    /// Damage multiplier in percent for incoming damage of the given type.
    ///
    /// Immunity wins outright, then weakness, then resistance. No affinity
    /// means 100.
    pub fn multiplier_percent(&self, damage_type: DamageType) -> u32 {
        match self.get(damage_type) {
            Some(Affinity::Immune) => 0,
            Some(Affinity::Weak(bonus)) => 100 + bonus,
            Some(Affinity::Resistant(reduction)) => 100u32.saturating_sub(reduction),
            None => 100,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(DamageType, Affinity)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immunity_zeroes_the_multiplier() {
        let mut a = Affinities::none();
        a.set(DamageType::Fire, Affinity::Immune);
        assert_eq!(a.multiplier_percent(DamageType::Fire), 0);
        assert_eq!(a.multiplier_percent(DamageType::Cold), 100);
    }

    #[test]
    fn weakness_and_resistance_scale() {
        let mut a = Affinities::none();
        a.set(DamageType::Cold, Affinity::Weak(50));
        a.set(DamageType::Poison, Affinity::Resistant(30));
        assert_eq!(a.multiplier_percent(DamageType::Cold), 150);
        assert_eq!(a.multiplier_percent(DamageType::Poison), 70);
    }

    #[test]
    fn set_replaces_existing_entry() {
        let mut a = Affinities::none();
        a.set(DamageType::Fire, Affinity::Weak(25));
        a.set(DamageType::Fire, Affinity::Immune);
        assert_eq!(a.multiplier_percent(DamageType::Fire), 0);
        assert_eq!(a.iter().count(), 1);
    }
}
