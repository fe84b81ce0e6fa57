//! Read-only observation handed to a bot each turn.

use crate::game::{Economy, Lane, Ruleset, Side};

/// Everything a bot may look at when deciding its action.
///
/// All fields are shared borrows; a bot can only change the game by
/// returning an action.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    /// Turn number just completed.
    pub turn: u32,
    /// Side this view belongs to.
    pub side: Side,
    /// Own economy.
    pub own: &'a Economy,
    /// Opponent's economy.
    pub opponent: &'a Economy,
    /// Lane carrying own invaders against opponent towers.
    pub attacking: &'a Lane,
    /// Lane carrying opponent invaders against own towers.
    pub defending: &'a Lane,
    /// Rules in force.
    pub ruleset: &'a Ruleset,
}

impl TurnView<'_> {
    /// Current price of a build.
    #[must_use]
    pub fn build_cost(&self) -> i64 {
        self.own.build_cost(self.ruleset)
    }

    /// Current price of an upgrade.
    #[must_use]
    pub fn upgrade_cost(&self) -> i64 {
        self.own.upgrade_cost(self.ruleset)
    }

    /// Price of a spawn with the given boosts.
    #[must_use]
    pub fn spawn_cost(&self, hp: i32, defense: i32, stun_res: i32) -> i64 {
        self.ruleset.invaders.spawn_cost(hp, defense, stun_res)
    }

    /// Whether own gold covers `cost`.
    #[must_use]
    pub const fn can_afford(&self, cost: i64) -> bool {
        self.own.can_afford(cost)
    }
}
