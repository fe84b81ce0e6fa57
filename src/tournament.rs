//! Match and series runners.
//!
//! Provides a pure function interface: `(config, bots) -> MatchResult`.
//! Series run many independent matches in parallel with rayon; each match
//! owns its own state, so nothing is shared between threads except the
//! read-only config and the bot factory.

use rayon::prelude::*;
use serde::Serialize;

use crate::bot::{Bot, BotBudget};
use crate::engine::Engine;
use crate::game::{EndReason, GameOver, Ruleset, Side, SideTotals};

/// Configuration shared by every match of a series.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchConfig {
    /// Rules in force.
    pub ruleset: Ruleset,
    /// Per-turn bot budget.
    pub budget: BotBudget,
}

/// Final result of a match.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Bot names, left then right.
    pub bots: [String; 2],
    /// Turns played.
    pub turns_played: u32,
    /// How the match ended.
    pub outcome: GameOver,
    /// Remaining life, left then right.
    pub life: [i32; 2],
    /// Final gold, left then right.
    pub gold: [i64; 2],
    /// Per-side totals, left then right.
    pub totals: [SideTotals; 2],
}

impl MatchResult {
    /// Winning side, or `None` on a draw.
    #[must_use]
    pub const fn winner(&self) -> Option<Side> {
        self.outcome.winner()
    }

    /// Totals for `side`.
    #[must_use]
    pub const fn totals(&self, side: Side) -> &SideTotals {
        &self.totals[side.index()]
    }
}

/// Play one match to completion.
#[must_use]
pub fn run_match(config: &MatchConfig, left: Box<dyn Bot>, right: Box<dyn Bot>) -> MatchResult {
    Engine::new(config.ruleset, left, right)
        .with_budget(config.budget)
        .run()
}

/// Aggregate statistics over a series of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeriesStats {
    /// Matches played.
    pub games_played: u64,
    /// Wins, left then right.
    pub wins: [u64; 2],
    /// Draws (both defeated, or turn limit).
    pub draws: u64,
    /// Matches that ended on the turn limit.
    pub turn_limits: u64,
    /// Sum of turns played.
    pub total_turns: u64,
    /// Sum of remaining life, left then right.
    pub total_life: [i64; 2],
    /// Sum of kills, left then right.
    pub total_kills: [u64; 2],
    /// Sum of breaches, left then right.
    pub total_breaches: [u64; 2],
}

impl SeriesStats {
    /// Fold one match into the stats.
    pub fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        match result.winner() {
            Some(side) => self.wins[side.index()] += 1,
            None => self.draws += 1,
        }
        if result.outcome.reason == EndReason::TurnLimit {
            self.turn_limits += 1;
        }
        self.total_turns += u64::from(result.turns_played);
        for side in Side::BOTH {
            let i = side.index();
            self.total_life[i] += i64::from(result.life[i]);
            self.total_kills[i] += result.totals[i].kills;
            self.total_breaches[i] += result.totals[i].breaches;
        }
    }

    /// Merge stats gathered on another thread.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.turn_limits += other.turn_limits;
        self.total_turns += other.total_turns;
        for side in Side::BOTH {
            let i = side.index();
            self.wins[i] += other.wins[i];
            self.total_life[i] += other.total_life[i];
            self.total_kills[i] += other.total_kills[i];
            self.total_breaches[i] += other.total_breaches[i];
        }
    }

    /// Fraction of matches won by `side`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self, side: Side) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins[side.index()] as f64 / self.games_played as f64
    }

    /// Mean match length.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }

    /// Mean remaining life for `side`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_life(&self, side: Side) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_life[side.index()] as f64 / self.games_played as f64
    }
}

/// Run `games` matches in parallel and fold the results.
///
/// Match `i` is played with seed `base_seed + i`; `factory` builds a fresh
/// bot for a side and seed.
#[must_use]
pub fn run_series<F>(config: &MatchConfig, factory: F, games: u64, base_seed: u64) -> SeriesStats
where
    F: Fn(Side, u64) -> Box<dyn Bot> + Sync,
{
    run_series_with(config, factory, games, base_seed, |_| {})
}

/// [`run_series`] with a callback invoked after each match, e.g. to tick
/// a progress bar. The callback runs on worker threads.
#[must_use]
pub fn run_series_with<F, C>(
    config: &MatchConfig,
    factory: F,
    games: u64,
    base_seed: u64,
    on_result: C,
) -> SeriesStats
where
    F: Fn(Side, u64) -> Box<dyn Bot> + Sync,
    C: Fn(&MatchResult) + Sync,
{
    // Each thread accumulates into its own stats; merged at the end
    (0..games)
        .into_par_iter()
        .fold(SeriesStats::default, |mut local, i| {
            let seed = base_seed.wrapping_add(i);
            let result = run_match(config, factory(Side::Left, seed), factory(Side::Right, seed));
            on_result(&result);
            local.add_result(&result);
            local
        })
        .reduce(SeriesStats::default, |mut a, b| {
            a.merge(&b);
            a
        })
}
