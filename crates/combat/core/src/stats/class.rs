//! Class modifiers folded into stat aggregation.

use strum::EnumIter;

use super::bonus::Bonus;
use super::effective::StatKind;

/// Playable (and enemy) combat classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    Warrior,
    Mage,
    Rogue,
    Ranger,
    Cleric,
}

impl ClassKind {
    /// Bonuses this class contributes to a derived stat.
    ///
    /// Classes lean a stat family rather than rewrite it; the numbers stay
    /// small so equipment and passives remain the dominant knobs.
    pub fn bonuses(self, stat: StatKind) -> &'static [Bonus] {
        use Bonus::{Flat, Increased};
        match (self, stat) {
            (ClassKind::Warrior, StatKind::Attack) => &[Increased(15)],
            (ClassKind::Warrior, StatKind::PhysicalDefense) => &[Increased(10)],
            (ClassKind::Warrior, StatKind::HpMax) => &[Increased(10)],

            (ClassKind::Mage, StatKind::MagicPower) => &[Increased(20)],
            (ClassKind::Mage, StatKind::ManaMax) => &[Increased(25)],
            (ClassKind::Mage, StatKind::PhysicalDefense) => &[Increased(-10)],

            (ClassKind::Rogue, StatKind::CritChance) => &[Flat(5)],
            (ClassKind::Rogue, StatKind::Evasion) => &[Increased(15)],
            (ClassKind::Rogue, StatKind::Attack) => &[Increased(5)],

            (ClassKind::Ranger, StatKind::Accuracy) => &[Flat(10)],
            (ClassKind::Ranger, StatKind::Speed) => &[Increased(10)],

            (ClassKind::Cleric, StatKind::MagicResistance) => &[Increased(15)],
            (ClassKind::Cleric, StatKind::ManaMax) => &[Increased(10)],
            (ClassKind::Cleric, StatKind::MagicPower) => &[Increased(5)],

            _ => &[],
        }
    }

    /// Attributes grown on level-up, in priority order.
    pub fn growth_attributes(self) -> [GrowthAttribute; 2] {
        match self {
            ClassKind::Warrior => [GrowthAttribute::Strength, GrowthAttribute::Vitality],
            ClassKind::Mage => [GrowthAttribute::Intellect, GrowthAttribute::Wisdom],
            ClassKind::Rogue => [GrowthAttribute::Agility, GrowthAttribute::Strength],
            ClassKind::Ranger => [GrowthAttribute::Agility, GrowthAttribute::Wisdom],
            ClassKind::Cleric => [GrowthAttribute::Wisdom, GrowthAttribute::Vitality],
        }
    }
}

impl Default for ClassKind {
    fn default() -> Self {
        ClassKind::Warrior
    }
}

/// Which attribute a level-up point lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthAttribute {
    Strength,
    Intellect,
    Agility,
    Vitality,
    Wisdom,
    Presence,
}
