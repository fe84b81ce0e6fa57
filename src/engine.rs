//! Turn orchestration.
//!
//! One call to [`Engine::step`] runs a full turn:
//! 1. Both lanes resolve; kill gold, breach rewards and life loss settle
//! 2. The turn counter advances
//! 3. Income and growth ticks apply
//! 4. Each bot is consulted, left then right, and its action applied
//! 5. Invariants are checked and termination decided
//!
//! After the game ends `step` does nothing and returns `false`.

use std::time::Instant;

use crate::bot::{Bot, BotBudget, Fuel};
use crate::game::invariants::assert_invariants;
use crate::game::{
    ActionRecord, GameOver, GameState, Growth, Ruleset, Side, SideTotals, TurnReport,
};
use crate::tournament::MatchResult;

/// A running match between two bots.
pub struct Engine {
    state: GameState,
    bots: [Box<dyn Bot>; 2],
    budget: BotBudget,
    growth: Box<dyn Growth>,
    last_report: Option<TurnReport>,
    totals: [SideTotals; 2],
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("turn", &self.state.turn())
            .field("left", &self.bots[0].name())
            .field("right", &self.bots[1].name())
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Start a match under `ruleset`, using the ruleset's growth law and
    /// the default budget.
    #[must_use]
    pub fn new(ruleset: Ruleset, left: Box<dyn Bot>, right: Box<dyn Bot>) -> Self {
        let growth = Box::new(ruleset.growth);
        Self {
            state: GameState::new(ruleset),
            bots: [left, right],
            budget: BotBudget::default(),
            growth,
            last_report: None,
            totals: [SideTotals::default(); 2],
        }
    }

    /// Replace the per-turn bot budget.
    #[must_use]
    pub fn with_budget(mut self, budget: BotBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Replace the growth law.
    #[must_use]
    pub fn with_growth(mut self, growth: Box<dyn Growth>) -> Self {
        self.growth = growth;
        self
    }

    /// Current game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Report for the most recent turn, if any has run.
    #[must_use]
    pub const fn last_report(&self) -> Option<&TurnReport> {
        self.last_report.as_ref()
    }

    /// Totals for `side` over all turns so far.
    #[must_use]
    pub const fn totals(&self, side: Side) -> &SideTotals {
        &self.totals[side.index()]
    }

    /// Name of `side`'s bot.
    #[must_use]
    pub fn bot_name(&self, side: Side) -> &str {
        self.bots[side.index()].name()
    }

    /// Run one turn. Returns whether the game is still running.
    pub fn step(&mut self) -> bool {
        if self.state.is_over() {
            return false;
        }

        let mut report = TurnReport::new(self.state.turn() + 1);
        self.state.resolve_lanes(&mut report);
        self.state.advance_turn();
        self.state.collect_income(&mut report);
        self.state.grow_economies(self.growth.as_ref(), &mut report);

        for side in Side::BOTH {
            report.side_mut(side).action = self.consult(side);
        }

        assert_invariants(&self.state);
        self.state.check_game_over();

        for side in Side::BOTH {
            self.totals[side.index()].absorb(report.side(side));
        }
        self.last_report = Some(report);

        if let Some(over) = self.state.game_over() {
            tracing::info!(
                turn = over.turn,
                reason = %over.reason,
                winner = ?over.winner(),
                "game over"
            );
            return false;
        }
        true
    }

    fn consult(&mut self, side: Side) -> ActionRecord {
        let mut fuel = Fuel::new(self.budget.fuel);
        let started = Instant::now();
        let view = self.state.view(side);
        let decision = self.bots[side.index()].decide(&view, &mut fuel);
        let elapsed = started.elapsed();

        let action = match decision {
            Err(e) => {
                tracing::warn!(turn = self.state.turn(), %side, error = %e, "bot dropped its turn");
                return ActionRecord::OutOfFuel;
            }
            Ok(action) => action,
        };
        if let Some(limit) = self.budget.time_limit.filter(|limit| elapsed > *limit) {
            tracing::warn!(
                turn = self.state.turn(),
                %side,
                ?elapsed,
                ?limit,
                "bot exceeded its time limit"
            );
            return ActionRecord::OverTime;
        }

        match action {
            Some(action) => self.state.record_action(side, action),
            None => ActionRecord::Idle,
        }
    }

    /// Play until the game ends.
    #[must_use]
    pub fn run(mut self) -> MatchResult {
        let outcome = loop {
            self.step();
            if let Some(over) = self.state.game_over() {
                break *over;
            }
        };
        self.finish(outcome)
    }

    fn finish(self, outcome: GameOver) -> MatchResult {
        let economy = |side| self.state.economy(side);
        MatchResult {
            bots: [
                self.bot_name(Side::Left).to_string(),
                self.bot_name(Side::Right).to_string(),
            ],
            turns_played: self.state.turn(),
            outcome,
            life: [economy(Side::Left).life(), economy(Side::Right).life()],
            gold: [economy(Side::Left).gold(), economy(Side::Right).gold()],
            totals: self.totals,
        }
    }
}
