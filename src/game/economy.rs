//! Per-side economy: gold, income, boost cap, life and cost inflation.
//!
//! Growth of income and boost cap is pluggable through the [`Growth`]
//! trait. [`GrowthLaw`] covers the two laws rulesets use (a fixed
//! increment, or one proportional to `floor(log10(turn))`), and the engine
//! accepts any other implementation.

use serde::{Deserialize, Serialize};

use crate::game::Ruleset;

/// Economic state for one side.
///
/// Fields are only mutated by the engine; strategies get `&Economy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Economy {
    pub(crate) gold: i64,
    pub(crate) income: i64,
    pub(crate) boost_cap: i64,
    pub(crate) life: i32,
    pub(crate) inflation: i64,
}

impl Economy {
    /// Create an economy with the ruleset's starting values.
    #[must_use]
    pub fn new(ruleset: &Ruleset) -> Self {
        Self {
            gold: ruleset.initial_gold,
            income: ruleset.initial_income,
            boost_cap: ruleset.initial_boost_cap,
            life: ruleset.initial_life,
            inflation: 0,
        }
    }

    /// Gold available for actions.
    #[must_use]
    pub const fn gold(&self) -> i64 {
        self.gold
    }

    /// Gold added every income interval.
    #[must_use]
    pub const fn income(&self) -> i64 {
        self.income
    }

    /// Ceiling on the total stat boost a spawned invader may carry.
    #[must_use]
    pub const fn boost_cap(&self) -> i64 {
        self.boost_cap
    }

    /// Remaining life. The side is defeated at zero or below.
    #[must_use]
    pub const fn life(&self) -> i32 {
        self.life
    }

    /// Accumulated cost inflation from towers currently standing.
    #[must_use]
    pub const fn inflation(&self) -> i64 {
        self.inflation
    }

    /// Whether this side has run out of life.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.life <= 0
    }

    /// Current price of building a tower.
    #[must_use]
    pub fn build_cost(&self, ruleset: &Ruleset) -> i64 {
        ruleset.costs.build_cost(self.inflation)
    }

    /// Current price of upgrading a tower.
    #[must_use]
    pub fn upgrade_cost(&self, ruleset: &Ruleset) -> i64 {
        ruleset.costs.upgrade_cost(self.inflation)
    }

    /// Whether `cost` can be paid right now.
    #[must_use]
    pub const fn can_afford(&self, cost: i64) -> bool {
        self.gold >= cost
    }
}

/// Amount by which income and boost cap grow at a growth tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthStep {
    /// Added to income.
    pub income: i64,
    /// Added to boost cap.
    pub boost: i64,
}

/// A growth law for income and boost cap.
pub trait Growth: Send + Sync {
    /// Growth applied at the growth tick that ends `turn`.
    fn grow(&self, turn: u32) -> GrowthStep;
}

/// The built-in, serializable growth laws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "lowercase")]
pub enum GrowthLaw {
    /// Constant increments every growth tick.
    Fixed {
        /// Income added per tick.
        income: i64,
        /// Boost cap added per tick.
        boost: i64,
    },
    /// Increments of `floor(log10(turn))` times a scale.
    Logarithmic {
        /// Multiplier for the income increment.
        income_scale: i64,
        /// Multiplier for the boost cap increment.
        boost_scale: i64,
    },
}

impl Default for GrowthLaw {
    fn default() -> Self {
        Self::Fixed {
            income: 3,
            boost: 5,
        }
    }
}

impl Growth for GrowthLaw {
    fn grow(&self, turn: u32) -> GrowthStep {
        match *self {
            Self::Fixed { income, boost } => GrowthStep { income, boost },
            Self::Logarithmic {
                income_scale,
                boost_scale,
            } => {
                let magnitude = if turn == 0 {
                    0
                } else {
                    i64::from(turn.ilog10())
                };
                GrowthStep {
                    income: magnitude * income_scale,
                    boost: magnitude * boost_scale,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_economy_uses_ruleset() {
        let ruleset = Ruleset::default();
        let economy = Economy::new(&ruleset);
        assert_eq!(economy.gold(), 500);
        assert_eq!(economy.income(), 10);
        assert_eq!(economy.boost_cap(), 0);
        assert_eq!(economy.life(), 100);
        assert_eq!(economy.inflation(), 0);
        assert!(!economy.is_defeated());
    }

    #[test]
    fn test_costs_follow_inflation() {
        let ruleset = Ruleset::default();
        let mut economy = Economy::new(&ruleset);
        assert_eq!(economy.build_cost(&ruleset), 50);
        assert_eq!(economy.upgrade_cost(&ruleset), 75);

        economy.inflation = 15;
        assert_eq!(economy.build_cost(&ruleset), 65);
        // 75 + floor(15 * 1.5)
        assert_eq!(economy.upgrade_cost(&ruleset), 97);
    }

    #[test]
    fn test_defeated_at_zero_life() {
        let mut economy = Economy::new(&Ruleset::default());
        economy.life = 0;
        assert!(economy.is_defeated());
        economy.life = -3;
        assert!(economy.is_defeated());
    }

    #[test]
    fn test_fixed_growth_ignores_turn() {
        let law = GrowthLaw::Fixed {
            income: 3,
            boost: 5,
        };
        assert_eq!(law.grow(100), GrowthStep { income: 3, boost: 5 });
        assert_eq!(law.grow(90_000), GrowthStep { income: 3, boost: 5 });
    }

    #[test]
    fn test_logarithmic_growth() {
        let law = GrowthLaw::Logarithmic {
            income_scale: 1,
            boost_scale: 2,
        };
        assert_eq!(law.grow(0), GrowthStep::default());
        assert_eq!(law.grow(9), GrowthStep::default());
        assert_eq!(law.grow(100), GrowthStep { income: 2, boost: 4 });
        assert_eq!(law.grow(999), GrowthStep { income: 2, boost: 4 });
        assert_eq!(law.grow(1000), GrowthStep { income: 3, boost: 6 });
    }

    #[test]
    fn test_growth_law_serde_tagged() {
        let law: GrowthLaw =
            serde_json::from_str(r#"{"law":"logarithmic","income_scale":1,"boost_scale":2}"#)
                .unwrap();
        assert_eq!(
            law,
            GrowthLaw::Logarithmic {
                income_scale: 1,
                boost_scale: 2
            }
        );
    }
}
