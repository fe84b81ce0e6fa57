//! Output formatting utilities for CLI.

use lanewar::{MatchResult, SeriesStats, Side};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult {
    /// Seed handed to random bots.
    pub(super) seed: u64,
    /// Winning side (null if draw).
    pub(super) winner: Option<Side>,
    /// Why the match ended.
    pub(super) reason: String,
    /// Total turns played.
    pub(super) turns_played: u32,
    /// Per-side results, left then right.
    pub(super) sides: Vec<JsonSideResult>,
}

/// JSON-serializable side result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSideResult {
    /// Side.
    pub(super) side: Side,
    /// Bot name.
    pub(super) bot: String,
    /// Remaining life.
    pub(super) life: i32,
    /// Final gold.
    pub(super) gold: i64,
    /// Invaders killed by this side's towers.
    pub(super) kills: u64,
    /// Invaders of this side that breached.
    pub(super) breaches: u64,
    /// Actions applied.
    pub(super) actions_applied: u64,
    /// Actions dropped.
    pub(super) actions_dropped: u64,
}

impl JsonMatchResult {
    /// Create from a `MatchResult`.
    pub(super) fn from_match_result(result: &MatchResult, seed: u64) -> Self {
        Self {
            seed,
            winner: result.winner(),
            reason: result.outcome.reason.to_string(),
            turns_played: result.turns_played,
            sides: Side::BOTH
                .iter()
                .map(|&side| {
                    let i = side.index();
                    let totals = result.totals(side);
                    JsonSideResult {
                        side,
                        bot: result.bots[i].clone(),
                        life: result.life[i],
                        gold: result.gold[i],
                        kills: totals.kills,
                        breaches: totals.breaches,
                        actions_applied: totals.actions_applied,
                        actions_dropped: totals.actions_dropped,
                    }
                })
                .collect(),
        }
    }
}

/// Format a match result as human-readable text.
pub(super) fn format_text(result: &MatchResult, seed: u64) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Match Result (seed: {seed})");
    match result.winner() {
        Some(side) => {
            let _ = writeln!(output, "  Winner: {side} ({})", result.bots[side.index()]);
        }
        None => output.push_str("  Winner: Draw\n"),
    }
    let _ = writeln!(
        output,
        "  Turns: {} ({})\n",
        result.turns_played, result.outcome.reason
    );

    for side in Side::BOTH {
        let i = side.index();
        let totals = result.totals(side);
        let _ = write!(
            output,
            "  {side:<5} {:<16} life {:>3}  gold {:>6}  kills {:>5}  breaches {:>5}",
            result.bots[i], result.life[i], result.gold[i], totals.kills, totals.breaches
        );
        if totals.actions_dropped > 0 {
            let _ = write!(output, "  [{} dropped]", totals.actions_dropped);
        }
        output.push('\n');
    }

    output
}

/// JSON-serializable series result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSeriesResult {
    /// Bot names, left then right.
    bots: [String; 2],
    /// Raw counters.
    stats: SeriesStats,
    /// Win rates, left then right.
    win_rates: [f64; 2],
    /// Average remaining life, left then right.
    avg_life: [f64; 2],
    /// Average game length in turns.
    avg_turns: f64,
}

impl JsonSeriesResult {
    /// Create from stats and bot names.
    pub(super) fn from_stats(stats: &SeriesStats, bots: &[String; 2]) -> Self {
        Self {
            bots: bots.clone(),
            stats: *stats,
            win_rates: [stats.win_rate(Side::Left), stats.win_rate(Side::Right)],
            avg_life: [stats.average_life(Side::Left), stats.average_life(Side::Right)],
            avg_turns: stats.average_turns(),
        }
    }
}

/// Format series stats as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_series_text(stats: &SeriesStats, bots: &[String; 2]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Tournament Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for side in Side::BOTH {
        let _ = writeln!(
            output,
            "  {side} ({}): {:.1}% ({} wins)",
            bots[side.index()],
            stats.win_rate(side) * 100.0,
            stats.wins[side.index()]
        );
    }
    let draw_rate = if stats.games_played == 0 {
        0.0
    } else {
        stats.draws as f64 / stats.games_played as f64 * 100.0
    };
    let _ = writeln!(output, "  Draws: {} ({draw_rate:.1}%)\n", stats.draws);

    output.push_str("Average Remaining Life:\n");
    for side in Side::BOTH {
        let _ = writeln!(
            output,
            "  {side} ({}): {:.1}",
            bots[side.index()],
            stats.average_life(side)
        );
    }

    let _ = writeln!(output, "\nAverage Game Length: {:.0} turns", stats.average_turns());
    let _ = writeln!(output, "Turn-limit endings: {}", stats.turn_limits);

    output
}

/// Format series stats as CSV.
pub(super) fn format_series_csv(stats: &SeriesStats, bots: &[String; 2]) -> String {
    let mut output = String::new();

    output.push_str("side,bot,wins,win_rate,avg_life,kills,breaches\n");
    for side in Side::BOTH {
        let i = side.index();
        let _ = writeln!(
            output,
            "{side},{},{},{:.4},{:.2},{},{}",
            bots[i],
            stats.wins[i],
            stats.win_rate(side),
            stats.average_life(side),
            stats.total_kills[i],
            stats.total_breaches[i]
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanewar::bot::{Idle, InvaderArmy};
    use lanewar::{MatchConfig, Ruleset, run_match};

    fn army_vs_idle() -> MatchResult {
        let config = MatchConfig {
            ruleset: Ruleset::default(),
            ..MatchConfig::default()
        };
        run_match(&config, Box::new(InvaderArmy::new()), Box::new(Idle))
    }

    #[test]
    fn test_text_names_winner() {
        let text = format_text(&army_vs_idle(), 9);
        assert!(text.contains("seed: 9"));
        assert!(text.contains("Winner: left (invader-army)"));
    }

    #[test]
    fn test_json_sides() {
        let json = JsonMatchResult::from_match_result(&army_vs_idle(), 1);
        assert_eq!(json.winner, Some(Side::Left));
        assert_eq!(json.sides.len(), 2);
        assert_eq!(json.sides[1].life, 0);
    }

    #[test]
    fn test_csv_has_row_per_side() {
        let mut stats = SeriesStats::default();
        stats.add_result(&army_vs_idle());
        let bots = ["a".to_string(), "b".to_string()];
        let csv = format_series_csv(&stats, &bots);
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.lines().nth(1).unwrap().starts_with("left,a,1,"));
    }
}
