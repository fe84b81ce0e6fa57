//! Per-turn accounting.
//!
//! Every change to a side's gold, income or life during a turn is recorded
//! in its [`SideReport`]. Summing a report reproduces the change in the
//! economy exactly, which tests rely on.

use crate::game::{Action, GrowthStep, Rejection, Side};

/// What happened to a bot's request this turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionRecord {
    /// The bot asked for nothing.
    #[default]
    Idle,
    /// The action was validated and applied.
    Applied {
        /// The action.
        action: Action,
        /// Gold change caused by it (negative for purchases).
        gold_delta: i64,
    },
    /// The action failed validation and was dropped.
    Rejected {
        /// The action.
        action: Action,
        /// Why it was dropped.
        reason: Rejection,
    },
    /// The bot ran out of fuel while deciding.
    OutOfFuel,
    /// The bot exceeded its wall-clock limit.
    OverTime,
}

impl ActionRecord {
    /// Gold change caused by the action.
    #[must_use]
    pub const fn gold_delta(&self) -> i64 {
        match self {
            Self::Applied { gold_delta, .. } => *gold_delta,
            _ => 0,
        }
    }

    /// Whether a requested action was dropped for any reason.
    #[must_use]
    pub const fn is_dropped(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::OutOfFuel | Self::OverTime)
    }
}

/// One side's ledger for a single turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideReport {
    /// Gold from kills in the lane this side defends.
    pub kill_gold: i64,
    /// Invaders this side's towers killed.
    pub kills: u32,
    /// This side's invaders that breached.
    pub breaches: u32,
    /// Gold from breaches.
    pub breach_gold: i64,
    /// Income gained from breaches.
    pub breach_income: i64,
    /// Life lost to the opponent's breaches.
    pub life_lost: i32,
    /// Income paid out at an income tick.
    pub income_collected: i64,
    /// Growth applied at a growth tick.
    pub growth: GrowthStep,
    /// The bot's request and its fate.
    pub action: ActionRecord,
}

impl SideReport {
    /// Net gold change over the turn.
    #[must_use]
    pub const fn gold_delta(&self) -> i64 {
        self.kill_gold + self.breach_gold + self.income_collected + self.action.gold_delta()
    }

    /// Net income change over the turn.
    #[must_use]
    pub const fn income_delta(&self) -> i64 {
        self.breach_income + self.growth.income
    }
}

/// Both sides' ledgers for one turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Turn number this report closes.
    pub turn: u32,
    /// Ledgers indexed by [`Side::index`].
    pub sides: [SideReport; 2],
}

impl TurnReport {
    /// Empty report for `turn`.
    #[must_use]
    pub fn new(turn: u32) -> Self {
        Self {
            turn,
            sides: [SideReport::default(); 2],
        }
    }

    /// Ledger for `side`.
    #[must_use]
    pub const fn side(&self, side: Side) -> &SideReport {
        &self.sides[side.index()]
    }

    /// Mutable ledger for `side`.
    pub fn side_mut(&mut self, side: Side) -> &mut SideReport {
        &mut self.sides[side.index()]
    }
}

/// Running totals for one side across a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideTotals {
    /// Invaders killed by this side's towers.
    pub kills: u64,
    /// This side's invaders that breached.
    pub breaches: u64,
    /// Gold earned from kills.
    pub kill_gold: i64,
    /// Gold earned from breaches.
    pub breach_gold: i64,
    /// Actions applied.
    pub actions_applied: u64,
    /// Actions dropped for any reason.
    pub actions_dropped: u64,
}

impl SideTotals {
    /// Fold one turn's ledger into the totals.
    pub fn absorb(&mut self, report: &SideReport) {
        self.kills += u64::from(report.kills);
        self.breaches += u64::from(report.breaches);
        self.kill_gold += report.kill_gold;
        self.breach_gold += report.breach_gold;
        match report.action {
            ActionRecord::Applied { .. } => self.actions_applied += 1,
            ActionRecord::Idle => {}
            _ => self.actions_dropped += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TowerKind;

    #[test]
    fn test_gold_delta_sums_sources() {
        let report = SideReport {
            kill_gold: 3,
            breach_gold: 7,
            income_collected: 10,
            action: ActionRecord::Applied {
                action: Action::build(TowerKind::Turret, 3),
                gold_delta: -50,
            },
            ..SideReport::default()
        };
        assert_eq!(report.gold_delta(), -30);
    }

    #[test]
    fn test_rejected_action_costs_nothing() {
        let record = ActionRecord::Rejected {
            action: Action::destroy(3),
            reason: Rejection::NoTower(3),
        };
        assert_eq!(record.gold_delta(), 0);
        assert!(record.is_dropped());
        assert!(!ActionRecord::Idle.is_dropped());
    }

    #[test]
    fn test_totals_absorb() {
        let mut totals = SideTotals::default();
        totals.absorb(&SideReport {
            kills: 2,
            kill_gold: 4,
            action: ActionRecord::OutOfFuel,
            ..SideReport::default()
        });
        totals.absorb(&SideReport {
            breaches: 1,
            breach_gold: 9,
            action: ActionRecord::Applied {
                action: Action::spawn(0, 0, 0),
                gold_delta: -10,
            },
            ..SideReport::default()
        });

        assert_eq!(totals.kills, 2);
        assert_eq!(totals.breaches, 1);
        assert_eq!(totals.kill_gold, 4);
        assert_eq!(totals.breach_gold, 9);
        assert_eq!(totals.actions_applied, 1);
        assert_eq!(totals.actions_dropped, 1);
    }
}
