//! Resource pools tracked per combatant.

use core::fmt;

/// The three spendable pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Hp,
    Mana,
    Stamina,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::Hp => "HP",
            ResourceKind::Mana => "mana",
            ResourceKind::Stamina => "stamina",
        };
        write!(f, "{}", label)
    }
}

/// Integer resource meter (HP, mana, stamina) with a hard `0..=maximum` range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Full meter at the given maximum.
    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Current value as an integer percent of maximum.
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            return 0;
        }
        self.current * 100 / self.maximum
    }

    /// Spend `amount` if available. Returns false (and leaves the meter
    /// untouched) when the pool is short.
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Restore up to `amount`, capped at maximum. Returns what was actually
    /// gained.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.maximum - self.current);
        self.current += gained;
        gained
    }

    /// Reduce by `amount`, clamped at `floor`. Returns the amount actually
    /// removed.
    pub fn deplete(&mut self, amount: u32, floor: u32) -> u32 {
        let new = self.current.saturating_sub(amount).max(floor.min(self.current));
        let removed = self.current - new;
        self.current = new;
        removed
    }

    /// Raise the maximum (level-up growth) and refill to full.
    pub fn grow_to(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.current = maximum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_refuses_overdraw() {
        let mut meter = ResourceMeter::full(10);
        assert!(meter.spend(10));
        assert!(!meter.spend(1));
        assert_eq!(meter.current, 0);
    }

    #[test]
    fn restore_caps_at_maximum() {
        let mut meter = ResourceMeter::new(8, 10);
        assert_eq!(meter.restore(5), 2);
        assert!(meter.is_full());
    }

    #[test]
    fn deplete_respects_floor() {
        let mut meter = ResourceMeter::full(30);
        assert_eq!(meter.deplete(100, 1), 29);
        assert_eq!(meter.current, 1);
    }

    #[test]
    fn deplete_below_floor_start_is_noop_under_floor() {
        // A meter already under the floor is not pulled up by it.
        let mut meter = ResourceMeter::new(0, 10);
        assert_eq!(meter.deplete(5, 1), 0);
        assert_eq!(meter.current, 0);
    }
}
