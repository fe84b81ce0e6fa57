//! Ruleset: every numeric constant of the game, as configuration.
//!
//! Two presets exist, [`Ruleset::inflationary`] (the default) and
//! [`Ruleset::logarithmic`]. Rulesets can also be loaded from TOML or JSON
//! files; missing fields fall back to the default preset.

// Reward and cost formulas truncate float products back to whole gold.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{GrowthLaw, Invader, TowerKind};

/// Complete set of game constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Ruleset {
    /// Gold each side starts with.
    pub initial_gold: i64,
    /// Life each side starts with.
    pub initial_life: i32,
    /// Income each side starts with.
    pub initial_income: i64,
    /// Boost cap each side starts with.
    pub initial_boost_cap: i64,
    /// Income is paid every this many turns.
    pub income_interval: u32,
    /// Income and boost cap grow every this many turns.
    pub growth_interval: u32,
    /// How income and boost cap grow.
    pub growth: GrowthLaw,
    /// Hard cap on game length.
    pub max_turns: u32,
    /// Invader pricing and kill reward.
    pub invaders: InvaderRules,
    /// What an attacker gains when an invader breaches.
    pub breach: BreachReward,
    /// Starting stats per tower kind.
    pub towers: TowerCatalog,
    /// Tower pricing, inflation and refunds.
    pub costs: TowerCosts,
    /// Cooldown of a freshly built tower.
    pub build_time: i32,
    /// Cooldown after an upgrade.
    pub upgrade_time: i32,
    /// Cooldown of an area tower after it detonates.
    pub area_cooldown: i32,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::inflationary()
    }
}

impl Ruleset {
    /// Largest power or range a tower template may start with.
    pub const MAX_TOWER_STAT: i32 = i32::MAX / 2;

    /// Fixed growth, with build and upgrade prices inflating per tower.
    #[must_use]
    pub fn inflationary() -> Self {
        Self {
            initial_gold: 500,
            initial_life: 100,
            initial_income: 10,
            initial_boost_cap: 0,
            income_interval: 10,
            growth_interval: 100,
            growth: GrowthLaw::Fixed {
                income: 3,
                boost: 5,
            },
            max_turns: 100_000,
            invaders: InvaderRules::default(),
            breach: BreachReward::default(),
            towers: TowerCatalog::default(),
            costs: TowerCosts::default(),
            build_time: 10,
            upgrade_time: 10,
            area_cooldown: 5,
        }
    }

    /// Growth proportional to `floor(log10(turn))`, flat tower prices.
    #[must_use]
    pub fn logarithmic() -> Self {
        Self {
            growth: GrowthLaw::Logarithmic {
                income_scale: 1,
                boost_scale: 2,
            },
            costs: TowerCosts {
                build_inflation: 0,
                upgrade_inflation: 0,
                ..TowerCosts::default()
            },
            ..Self::inflationary()
        }
    }

    /// Look up a preset by name.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "inflationary" | "default" => Some(Self::inflationary()),
            "logarithmic" => Some(Self::logarithmic()),
            _ => None,
        }
    }

    /// Load a ruleset from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown
    /// extension, fails to parse, or fails validation.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let ruleset = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        Ok(ruleset)
    }

    /// Parse and validate a TOML ruleset.
    ///
    /// # Errors
    ///
    /// Returns an error on parse or validation failure.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let ruleset: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Parse and validate a JSON ruleset.
    ///
    /// # Errors
    ///
    /// Returns an error on parse or validation failure.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let ruleset: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Reject rulesets the engine cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.income_interval == 0 {
            problems.push("income_interval must be positive".to_string());
        }
        if self.growth_interval == 0 {
            problems.push("growth_interval must be positive".to_string());
        }
        if self.max_turns == 0 {
            problems.push("max_turns must be positive".to_string());
        }
        if self.initial_gold < 0 || self.initial_boost_cap < 0 || self.initial_income < 0 {
            problems.push(
                "initial_gold, initial_income and initial_boost_cap must be non-negative"
                    .to_string(),
            );
        }
        if self.initial_life <= 0 {
            problems.push("initial_life must be positive".to_string());
        }
        if self.invaders.base_hp <= 0 {
            problems.push("invaders.base_hp must be positive".to_string());
        }
        let invaders = &self.invaders;
        let invader_costs = [
            invaders.base_cost,
            invaders.hp_cost,
            invaders.defense_cost,
            invaders.stun_resistance_cost,
        ];
        if invader_costs.iter().any(|&cost| cost < 0) {
            problems.push("invader costs must be non-negative".to_string());
        }
        if !is_non_negative(invaders.kill_gold_ratio) {
            problems.push("invaders.kill_gold_ratio must be non-negative".to_string());
        }
        let costs = &self.costs;
        let tower_costs = [
            costs.base_build,
            costs.base_upgrade,
            costs.build_inflation,
            costs.upgrade_inflation,
        ];
        if tower_costs.iter().any(|&cost| cost < 0) {
            problems.push("tower costs and inflation increments must be non-negative".to_string());
        }
        if !is_non_negative(costs.build_inflation_ratio)
            || !is_non_negative(costs.upgrade_inflation_ratio)
        {
            problems.push("costs inflation ratios must be non-negative".to_string());
        }
        let (income_step, boost_step) = match self.growth {
            GrowthLaw::Fixed { income, boost } => (income, boost),
            GrowthLaw::Logarithmic {
                income_scale,
                boost_scale,
            } => (income_scale, boost_scale),
        };
        if income_step < 0 || boost_step < 0 {
            problems.push("growth must not shrink income or boost cap".to_string());
        }
        let (BreachReward::IncomeFraction { income_bonus }
        | BreachReward::RemainingHealth { income_bonus }) = self.breach;
        if income_bonus < 0 {
            problems.push("breach.income_bonus must be non-negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.costs.refund_ratio) {
            problems.push("costs.refund_ratio must be within [0, 1]".to_string());
        }
        if self.build_time < 0 || self.upgrade_time < 0 || self.area_cooldown < 0 {
            problems.push("cooldowns must be non-negative".to_string());
        }
        for kind in TowerKind::ALL {
            let template = self.towers.template(kind);
            if !(1..=Self::MAX_TOWER_STAT).contains(&template.power)
                || !(0..=Self::MAX_TOWER_STAT).contains(&template.range)
            {
                problems.push(format!(
                    "towers.{kind} needs power in [1, {max}] and range in [0, {max}]",
                    max = Self::MAX_TOWER_STAT
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Whether `turn` ends with an income payment.
    #[must_use]
    pub const fn is_income_turn(&self, turn: u32) -> bool {
        self.income_interval != 0 && turn % self.income_interval == 0
    }

    /// Whether `turn` ends with a growth tick.
    #[must_use]
    pub const fn is_growth_turn(&self, turn: u32) -> bool {
        self.growth_interval != 0 && turn % self.growth_interval == 0
    }
}

fn is_non_negative(ratio: f64) -> bool {
    !ratio.is_nan() && ratio >= 0.0
}

/// Invader pricing and the gold a defender earns for a kill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvaderRules {
    /// Health of an unboosted invader.
    pub base_hp: i32,
    /// Price of an unboosted invader.
    pub base_cost: i64,
    /// Price per extra point of health.
    pub hp_cost: i64,
    /// Price per point of defense.
    pub defense_cost: i64,
    /// Price per point of stun resistance.
    pub stun_resistance_cost: i64,
    /// Share of an invader's value paid out when it is killed.
    pub kill_gold_ratio: f64,
}

impl Default for InvaderRules {
    fn default() -> Self {
        Self {
            base_hp: 10,
            base_cost: 10,
            hp_cost: 1,
            defense_cost: 10,
            stun_resistance_cost: 10,
            kill_gold_ratio: 0.1,
        }
    }
}

impl InvaderRules {
    /// Price of an invader with the given boosts.
    #[must_use]
    pub fn spawn_cost(&self, hp: i32, defense: i32, stun_resistance: i32) -> i64 {
        self.base_cost
            + i64::from(hp) * self.hp_cost
            + i64::from(defense) * self.defense_cost
            + i64::from(stun_resistance) * self.stun_resistance_cost
    }

    /// Gold credited to the defender for killing `invader`.
    ///
    /// Computed from max health, so overkill does not change the reward.
    #[must_use]
    pub fn kill_reward(&self, invader: &Invader) -> i64 {
        let value = i64::from(invader.max_health())
            + self.defense_cost * i64::from(invader.defense())
            + self.stun_resistance_cost * i64::from(invader.stun_resistance());
        (value as f64 * self.kill_gold_ratio).floor() as i64
    }
}

/// Payout to an attacker whose invader breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreachReward {
    /// Gold equal to the invader's remaining health fraction of current
    /// income, plus a permanent income bonus.
    IncomeFraction {
        /// Added to the attacker's income per breach.
        income_bonus: i64,
    },
    /// Gold equal to the invader's remaining health, plus an income bonus.
    RemainingHealth {
        /// Added to the attacker's income per breach.
        income_bonus: i64,
    },
}

impl Default for BreachReward {
    fn default() -> Self {
        Self::IncomeFraction { income_bonus: 1 }
    }
}

/// Result of evaluating a breach against a [`BreachReward`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreachPayout {
    /// Gold paid to the attacker.
    pub gold: i64,
    /// Added to the attacker's income.
    pub income: i64,
}

impl BreachReward {
    /// Evaluate the payout for `invader` given the attacker's income
    /// before the breach.
    #[must_use]
    pub fn payout(&self, invader: &Invader, attacker_income: i64) -> BreachPayout {
        match *self {
            Self::IncomeFraction { income_bonus } => BreachPayout {
                gold: (invader.health_fraction() * attacker_income as f64).floor() as i64,
                income: income_bonus,
            },
            Self::RemainingHealth { income_bonus } => BreachPayout {
                gold: i64::from(invader.health().max(0)),
                income: income_bonus,
            },
        }
    }
}

/// Initial power and range of a tower kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TowerTemplate {
    /// Starting power.
    pub power: i32,
    /// Starting range.
    pub range: i32,
}

/// Starting stats for each tower kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TowerCatalog {
    /// Direct-line tower.
    pub turret: TowerTemplate,
    /// Single-target stun tower.
    pub stunner: TowerTemplate,
    /// Area tower.
    pub bomb: TowerTemplate,
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self {
            turret: TowerTemplate { power: 1, range: 1 },
            stunner: TowerTemplate { power: 3, range: 0 },
            bomb: TowerTemplate { power: 2, range: 2 },
        }
    }
}

impl TowerCatalog {
    /// Template for `kind`.
    #[must_use]
    pub const fn template(&self, kind: TowerKind) -> TowerTemplate {
        match kind {
            TowerKind::Turret => self.turret,
            TowerKind::Stunner => self.stunner,
            TowerKind::Bomb => self.bomb,
        }
    }
}

/// Tower prices, inflation and destroy refunds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TowerCosts {
    /// Build price before inflation.
    pub base_build: i64,
    /// Upgrade price before inflation.
    pub base_upgrade: i64,
    /// Inflation added by each build.
    pub build_inflation: i64,
    /// Build price added per point of inflation.
    pub build_inflation_ratio: f64,
    /// Inflation added by each upgrade.
    pub upgrade_inflation: i64,
    /// Upgrade price added per point of inflation.
    pub upgrade_inflation_ratio: f64,
    /// Share of the base investment returned on destroy.
    pub refund_ratio: f64,
}

impl Default for TowerCosts {
    fn default() -> Self {
        Self {
            base_build: 50,
            base_upgrade: 75,
            build_inflation: 10,
            build_inflation_ratio: 1.0,
            upgrade_inflation: 5,
            upgrade_inflation_ratio: 1.5,
            refund_ratio: 0.5,
        }
    }
}

impl TowerCosts {
    /// Build price at the given inflation.
    #[must_use]
    pub fn build_cost(&self, inflation: i64) -> i64 {
        self.base_build + (inflation as f64 * self.build_inflation_ratio).floor() as i64
    }

    /// Upgrade price at the given inflation.
    #[must_use]
    pub fn upgrade_cost(&self, inflation: i64) -> i64 {
        self.base_upgrade + (inflation as f64 * self.upgrade_inflation_ratio).floor() as i64
    }

    /// Gold returned when destroying a tower of `level`.
    #[must_use]
    pub fn refund(&self, level: i32) -> i64 {
        let invested = self.base_build + self.base_upgrade * i64::from(level - 1);
        (invested as f64 * self.refund_ratio).floor() as i64
    }
}
