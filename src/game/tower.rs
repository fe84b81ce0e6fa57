//! Towers: stationary defenses and their per-kind attack behavior.
//!
//! The three kinds form a closed set. [`Tower::act`] is the single entry
//! point that dispatches on the kind for one tick.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::{Invader, LANE_LEN, Ruleset};

/// Tower behavior variant, fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerKind {
    /// Hits the first invader found in range, every tick it is ready.
    #[serde(alias = "direct-line", alias = "direct_line")]
    Turret,
    /// Stuns the first unstunned invader in range, then rests.
    #[serde(alias = "stun")]
    Stunner,
    /// Detonates over its whole range once an invader stands on its slot.
    #[serde(alias = "area")]
    Bomb,
}

impl TowerKind {
    /// All kinds, in a fixed order.
    pub const ALL: [Self; 3] = [Self::Turret, Self::Stunner, Self::Bomb];

    /// Lowercase name used in actions and config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Turret => "turret",
            Self::Stunner => "stunner",
            Self::Bomb => "bomb",
        }
    }
}

impl fmt::Display for TowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TowerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "turret" | "direct-line" | "direct_line" => Ok(Self::Turret),
            "stunner" | "stun" => Ok(Self::Stunner),
            "bomb" | "area" => Ok(Self::Bomb),
            other => Err(format!("unknown tower kind: {other}")),
        }
    }
}

/// Tower stat that an upgrade can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// Damage per hit, or stun strength.
    Power,
    /// Reach on either side of the tower.
    Range,
}

/// Effect of one tower activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strike {
    /// Kill rewards earned.
    pub gold: i64,
    /// Invaders removed.
    pub kills: u32,
}

impl Strike {
    fn record_kill(&mut self, reward: i64) {
        self.gold += reward;
        self.kills += 1;
    }
}

impl std::ops::AddAssign for Strike {
    fn add_assign(&mut self, rhs: Self) {
        self.gold += rhs.gold;
        self.kills += rhs.kills;
    }
}

/// A tower standing in a lane slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tower {
    pub(crate) kind: TowerKind,
    pub(crate) position: usize,
    pub(crate) power: i32,
    pub(crate) range: i32,
    pub(crate) cooldown: i32,
    pub(crate) level: i32,
    pub(crate) inflation_contributed: i64,
}

impl Tower {
    /// Build a tower of `kind` at `position`, using the ruleset's template
    /// for its stats and build time for its initial cooldown.
    #[must_use]
    pub fn new(kind: TowerKind, position: usize, ruleset: &Ruleset) -> Self {
        let template = ruleset.towers.template(kind);
        Self {
            kind,
            position,
            power: template.power,
            range: template.range,
            cooldown: ruleset.build_time,
            level: 1,
            inflation_contributed: ruleset.costs.build_inflation,
        }
    }

    /// Behavior variant.
    #[must_use]
    pub const fn kind(&self) -> TowerKind {
        self.kind
    }

    /// Lane slot the tower stands on.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Damage or stun strength.
    #[must_use]
    pub const fn power(&self) -> i32 {
        self.power
    }

    /// Reach on either side.
    #[must_use]
    pub const fn range(&self) -> i32 {
        self.range
    }

    /// Ticks until the tower may act.
    #[must_use]
    pub const fn cooldown(&self) -> i32 {
        self.cooldown
    }

    /// One plus the number of upgrades applied.
    #[must_use]
    pub const fn level(&self) -> i32 {
        self.level
    }

    /// Cost inflation this tower added to its owner's economy.
    #[must_use]
    pub const fn inflation_contributed(&self) -> i64 {
        self.inflation_contributed
    }

    /// Inclusive slot span covered by this tower, clipped to the lane.
    #[must_use]
    pub fn reach(&self) -> (usize, usize) {
        let range = usize::try_from(self.range).unwrap_or(0);
        let low = self.position.saturating_sub(range);
        let high = self.position.saturating_add(range).min(LANE_LEN - 1);
        (low, high)
    }

    /// Raise `stat` by one, bump the level and go on upgrade cooldown.
    pub(crate) fn upgrade(&mut self, stat: Stat, ruleset: &Ruleset) {
        match stat {
            Stat::Power => self.power = self.power.saturating_add(1),
            Stat::Range => self.range = self.range.saturating_add(1),
        }
        self.level = self.level.saturating_add(1);
        self.cooldown = ruleset.upgrade_time;
        self.inflation_contributed += ruleset.costs.upgrade_inflation;
    }

    /// Resolve this tower's action for one tick against the lane's
    /// invader slots.
    ///
    /// A tower on cooldown only counts down. Killed invaders are removed
    /// from `invaders` and their rewards returned.
    pub fn act(&mut self, invaders: &mut [Option<Invader>; LANE_LEN], ruleset: &Ruleset) -> Strike {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Strike::default();
        }

        match self.kind {
            TowerKind::Turret => self.fire(invaders, ruleset),
            TowerKind::Stunner => {
                self.stun(invaders);
                Strike::default()
            }
            TowerKind::Bomb => self.detonate(invaders, ruleset),
        }
    }

    /// Hit the first invader scanning from the far edge of reach back
    /// toward the near edge. Turrets never re-arm.
    fn fire(&self, invaders: &mut [Option<Invader>; LANE_LEN], ruleset: &Ruleset) -> Strike {
        let (low, high) = self.reach();
        let mut strike = Strike::default();

        for slot in invaders[low..=high].iter_mut().rev() {
            let Some(invader) = slot.as_mut() else {
                continue;
            };
            if invader.damage(self.power) {
                strike.record_kill(ruleset.invaders.kill_reward(invader));
                *slot = None;
            }
            break;
        }

        strike
    }

    /// Stun the first unstunned invader in reach, same scan order as
    /// [`Self::fire`], then rest for `power + 1` ticks.
    fn stun(&mut self, invaders: &mut [Option<Invader>; LANE_LEN]) {
        let (low, high) = self.reach();

        let target = invaders[low..=high]
            .iter_mut()
            .rev()
            .flatten()
            .find(|invader| invader.stun_remaining() == 0);
        if let Some(invader) = target {
            invader.stun(self.power);
            self.cooldown = self.power.saturating_add(1);
        }
    }

    /// If an invader stands on the tower's own slot, damage every invader
    /// in reach and go on cooldown.
    fn detonate(&mut self, invaders: &mut [Option<Invader>; LANE_LEN], ruleset: &Ruleset) -> Strike {
        let mut strike = Strike::default();
        if invaders[self.position].is_none() {
            return strike;
        }

        let (low, high) = self.reach();
        for slot in &mut invaders[low..=high] {
            let Some(invader) = slot.as_mut() else {
                continue;
            };
            if invader.damage(self.power) {
                strike.record_kill(ruleset.invaders.kill_reward(invader));
                *slot = None;
            }
        }
        self.cooldown = ruleset.area_cooldown;

        strike
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_slots() -> [Option<Invader>; LANE_LEN] {
        [None; LANE_LEN]
    }

    fn place(slots: &mut [Option<Invader>; LANE_LEN], position: usize, mut invader: Invader) {
        invader.position = position;
        slots[position] = Some(invader);
    }

    fn ready(kind: TowerKind, position: usize) -> Tower {
        let mut tower = Tower::new(kind, position, &Ruleset::default());
        tower.cooldown = 0;
        tower
    }

    #[test]
    fn test_new_tower_uses_template() {
        let ruleset = Ruleset::default();
        let turret = Tower::new(TowerKind::Turret, 50, &ruleset);
        assert_eq!((turret.power(), turret.range()), (1, 1));
        assert_eq!(turret.cooldown(), 10);
        assert_eq!(turret.level(), 1);
        assert_eq!(turret.inflation_contributed(), 10);

        let stunner = Tower::new(TowerKind::Stunner, 50, &ruleset);
        assert_eq!((stunner.power(), stunner.range()), (3, 0));

        let bomb = Tower::new(TowerKind::Bomb, 50, &ruleset);
        assert_eq!((bomb.power(), bomb.range()), (2, 2));
    }

    #[test]
    fn test_kind_parsing_accepts_aliases() {
        assert_eq!("direct-line".parse::<TowerKind>(), Ok(TowerKind::Turret));
        assert_eq!("stun".parse::<TowerKind>(), Ok(TowerKind::Stunner));
        assert_eq!("area".parse::<TowerKind>(), Ok(TowerKind::Bomb));
        assert!("cannon".parse::<TowerKind>().is_err());
    }

    #[test]
    fn test_reach_clipped_to_lane() {
        let mut tower = ready(TowerKind::Bomb, 1);
        assert_eq!(tower.reach(), (0, 3));
        tower.position = 98;
        assert_eq!(tower.reach(), (96, 99));
    }

    #[test]
    fn test_cooldown_counts_down_without_acting() {
        let ruleset = Ruleset::default();
        let mut tower = Tower::new(TowerKind::Turret, 10, &ruleset);
        let mut slots = empty_slots();
        place(&mut slots, 10, Invader::new(10, 0, 0));

        let strike = tower.act(&mut slots, &ruleset);
        assert_eq!(strike, Strike::default());
        assert_eq!(tower.cooldown(), 9);
        assert_eq!(slots[10].map(|i| i.health()), Some(10));
    }

    #[test]
    fn test_turret_hits_farthest_in_reach_only() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Turret, 10);
        let mut slots = empty_slots();
        place(&mut slots, 9, Invader::new(10, 0, 0));
        place(&mut slots, 11, Invader::new(10, 0, 0));

        tower.act(&mut slots, &ruleset);
        assert_eq!(slots[11].map(|i| i.health()), Some(9));
        assert_eq!(slots[9].map(|i| i.health()), Some(10));
        assert_eq!(tower.cooldown(), 0);
    }

    #[test]
    fn test_turret_fires_every_tick() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Turret, 10);
        let mut slots = empty_slots();
        place(&mut slots, 10, Invader::new(3, 0, 0));

        tower.act(&mut slots, &ruleset);
        tower.act(&mut slots, &ruleset);
        let strike = tower.act(&mut slots, &ruleset);

        assert!(slots[10].is_none());
        assert_eq!(strike.kills, 1);
        // floor(3 * 0.1)
        assert_eq!(strike.gold, 0);
    }

    #[test]
    fn test_turret_kill_reward_from_max_health() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Turret, 20);
        tower.power = 12;
        let mut slots = empty_slots();
        place(&mut slots, 20, Invader::new(10, 0, 0));

        let strike = tower.act(&mut slots, &ruleset);
        assert!(slots[20].is_none());
        assert_eq!(strike, Strike { gold: 1, kills: 1 });
    }

    #[test]
    fn test_stunner_skips_stunned_and_rests() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Stunner, 40);
        tower.range = 1;
        let mut slots = empty_slots();
        let mut stunned = Invader::new(10, 0, 0);
        stunned.stun(2);
        place(&mut slots, 41, stunned);
        place(&mut slots, 39, Invader::new(10, 0, 1));

        tower.act(&mut slots, &ruleset);

        assert_eq!(slots[41].map(|i| i.stun_remaining()), Some(2));
        assert_eq!(slots[39].map(|i| i.stun_remaining()), Some(2));
        assert_eq!(tower.cooldown(), 4);
    }

    #[test]
    fn test_stunner_without_target_stays_ready() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Stunner, 40);
        let mut slots = empty_slots();
        tower.act(&mut slots, &ruleset);
        assert_eq!(tower.cooldown(), 0);
    }

    #[test]
    fn test_stunner_rest_saturates_at_max_power() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Stunner, 40);
        tower.power = i32::MAX;
        let mut slots = empty_slots();
        place(&mut slots, 40, Invader::new(10, 0, 0));

        tower.act(&mut slots, &ruleset);
        assert_eq!(tower.cooldown(), i32::MAX);
        assert_eq!(slots[40].map(|i| i.stun_remaining()), Some(i32::MAX));
    }

    #[test]
    fn test_upgrade_saturates_stats() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Turret, 10);
        tower.power = i32::MAX;
        tower.range = i32::MAX;
        tower.level = i32::MAX;

        tower.upgrade(Stat::Power, &ruleset);
        tower.upgrade(Stat::Range, &ruleset);
        assert_eq!((tower.power(), tower.range(), tower.level()), (i32::MAX, i32::MAX, i32::MAX));
    }

    #[test]
    fn test_bomb_needs_invader_on_own_slot() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Bomb, 50);
        let mut slots = empty_slots();
        place(&mut slots, 51, Invader::new(10, 0, 0));

        let strike = tower.act(&mut slots, &ruleset);
        assert_eq!(strike, Strike::default());
        assert_eq!(slots[51].map(|i| i.health()), Some(10));
        assert_eq!(tower.cooldown(), 0);
    }

    #[test]
    fn test_bomb_rewards_each_removed_invader() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Bomb, 50);
        let mut slots = empty_slots();
        place(&mut slots, 48, Invader::new(2, 0, 0));
        // Reward 2 for this one: floor((10 + 10) * 0.1)
        let mut tough = Invader::new(10, 1, 0);
        tough.health = 1;
        place(&mut slots, 50, tough);
        place(&mut slots, 52, Invader::new(30, 0, 0));
        place(&mut slots, 53, Invader::new(1, 0, 0));

        let strike = tower.act(&mut slots, &ruleset);

        assert!(slots[48].is_none());
        assert!(slots[50].is_none());
        assert_eq!(slots[52].map(|i| i.health()), Some(28));
        assert_eq!(slots[53].map(|i| i.health()), Some(1));
        assert_eq!(strike, Strike { gold: 2, kills: 2 });
        assert_eq!(tower.cooldown(), 5);
    }

    #[test]
    fn test_upgrade_tracks_level_and_inflation() {
        let ruleset = Ruleset::default();
        let mut tower = ready(TowerKind::Turret, 5);
        tower.upgrade(Stat::Range, &ruleset);
        tower.upgrade(Stat::Power, &ruleset);

        assert_eq!(tower.range(), 2);
        assert_eq!(tower.power(), 2);
        assert_eq!(tower.level(), 3);
        assert_eq!(tower.cooldown(), 10);
        assert_eq!(tower.inflation_contributed(), 20);
    }
}
