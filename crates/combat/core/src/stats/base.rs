//! Base attributes stored per combatant.

use super::bonus::StatBounds;
use super::class::GrowthAttribute;

/// The six raw attributes every combatant carries.
///
/// Everything else (attack, defenses, accuracy, resource maxima) is derived
/// from these plus class, equipment, passives, and bond. Attributes are
/// clamped to [`StatBounds::ATTRIBUTES`] on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub strength: i32,
    pub intellect: i32,
    pub agility: i32,
    pub vitality: i32,
    pub wisdom: i32,
    pub presence: i32,
}

impl BaseStats {
    pub fn new(
        strength: i32,
        intellect: i32,
        agility: i32,
        vitality: i32,
        wisdom: i32,
        presence: i32,
    ) -> Self {
        let clamp = |v: i32| v.clamp(StatBounds::ATTRIBUTES.min, StatBounds::ATTRIBUTES.max);
        Self {
            strength: clamp(strength),
            intellect: clamp(intellect),
            agility: clamp(agility),
            vitality: clamp(vitality),
            wisdom: clamp(wisdom),
            presence: clamp(presence),
        }
    }

    /// Flat 10s across the board, the recruit template.
    pub fn even(value: i32) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    /// Raise one attribute by a point (level-up growth), respecting bounds.
    pub fn raise(&mut self, attribute: GrowthAttribute) {
        let slot = match attribute {
            GrowthAttribute::Strength => &mut self.strength,
            GrowthAttribute::Intellect => &mut self.intellect,
            GrowthAttribute::Agility => &mut self.agility,
            GrowthAttribute::Vitality => &mut self.vitality,
            GrowthAttribute::Wisdom => &mut self.wisdom,
            GrowthAttribute::Presence => &mut self.presence,
        };
        *slot = (*slot + 1).min(StatBounds::ATTRIBUTES.max);
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::even(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_clamps_attributes() {
        let stats = BaseStats::new(0, 250, 10, 10, 10, 10);
        assert_eq!(stats.strength, 1);
        assert_eq!(stats.intellect, 99);
    }
}
