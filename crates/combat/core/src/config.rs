/// Engine configuration constants and tunable parameters.
///
/// Compile-time maxima are used as type parameters for bounded collections.
/// The tunable struct carries the numeric knobs of the resolution model so
/// balance changes never require touching the pipeline itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Base chance (percent) for any attack to land before accuracy and
    /// evasion are weighed in.
    pub base_hit: i32,
    /// Lower clamp on hit chance. Even badly outmatched attackers can land one.
    pub min_hit: i32,
    /// Upper clamp on hit chance. Nothing is guaranteed.
    pub max_hit: i32,
    /// Percent points of hit chance per point of (accuracy - evasion).
    pub hit_scale: i32,
    /// Crit damage multiplier in percent when no equipment modifies it.
    pub base_crit_damage: u32,
    /// Base chance (percent) for a flee attempt at equal speed.
    pub base_flee: i32,
    /// Clamp bounds for flee chance.
    pub min_flee: i32,
    pub max_flee: i32,
    /// Percent of damage taken that a Counter stance reflects.
    pub counter_percent: u32,
    /// Base chance (percent) for a declared Dodge to void an incoming hit.
    pub dodge_base: i32,
    /// Minimum HP a combatant is clamped to instead of a literal zero.
    /// Reaching the floor counts as defeat; persisted HP never reads 0.
    pub death_floor: u32,
    /// Mana restored by Meditate per point of wisdom.
    pub meditate_wisdom_scale: u32,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_EQUIPMENT: usize = 6;
    pub const MAX_PASSIVES: usize = 8;
    pub const MAX_SKILLS: usize = 12;
    pub const MAX_AFFINITIES: usize = 6;

    // ===== tunable defaults =====
    pub const DEFAULT_BASE_HIT: i32 = 85;
    pub const DEFAULT_MIN_HIT: i32 = 10;
    pub const DEFAULT_MAX_HIT: i32 = 99;
    pub const DEFAULT_BASE_FLEE: i32 = 75;
    pub const DEFAULT_CRIT_DAMAGE: u32 = 200;

    pub fn new() -> Self {
        Self {
            base_hit: Self::DEFAULT_BASE_HIT,
            min_hit: Self::DEFAULT_MIN_HIT,
            max_hit: Self::DEFAULT_MAX_HIT,
            hit_scale: 1,
            base_crit_damage: Self::DEFAULT_CRIT_DAMAGE,
            base_flee: Self::DEFAULT_BASE_FLEE,
            min_flee: 5,
            max_flee: 95,
            counter_percent: 50,
            dodge_base: 40,
            death_floor: 1,
            meditate_wisdom_scale: 2,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
