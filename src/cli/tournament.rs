//! Tournament command implementation.

use super::output::{JsonSeriesResult, format_series_csv, format_series_text};
use super::{CliError, RulesArgs, TournamentFormat, parse_bot};
use indicatif::{ProgressBar, ProgressStyle};
use lanewar::bot::{Idle, Scripted};
use lanewar::tournament::run_series_with;
use lanewar::{Bot, BotSpec, Side};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

fn size_thread_pool(num_threads: usize) {
    let built = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global();
    if let Err(e) = built {
        tracing::debug!(error = %e, "global thread pool already set up");
    }
}

/// Seed from the wall clock when none was given.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

fn load_script(spec: &BotSpec) -> Result<Option<Scripted>, CliError> {
    match spec {
        BotSpec::Scripted(path) => Ok(Some(Scripted::load(path)?)),
        _ => Ok(None),
    }
}

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if a bot or the ruleset cannot be loaded.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    left: &str,
    right: &str,
    rules: &RulesArgs,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = rules.match_config()?;
    let specs = [parse_bot(left)?, parse_bot(right)?];

    // Load scripts once up front so bad files fail before the series starts
    let scripts = [load_script(&specs[0])?, load_script(&specs[1])?];
    let bot_names = [specs[0].label(), specs[1].label()];

    if let Some(num_threads) = threads {
        size_thread_pool(num_threads);
    }
    let base_seed = seed.unwrap_or_else(clock_seed);
    tracing::info!(games, base_seed, left = %bot_names[0], right = %bot_names[1], "starting series");

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Bad progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Only scripts can fail to build, and those are cloned from the preloaded copy
    let factory = |side: Side, game_seed: u64| -> Box<dyn Bot> {
        if let Some(script) = &scripts[side.index()] {
            return Box::new(script.clone());
        }
        let seed = game_seed.wrapping_mul(2).wrapping_add(side.index() as u64);
        specs[side.index()]
            .build(seed)
            .unwrap_or_else(|_| Box::new(Idle))
    };
    let stats = run_series_with(&config, factory, games, base_seed, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let elapsed = start.elapsed().as_secs_f64();
    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if elapsed > 0.0 {
        stats.games_played as f64 / elapsed
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_series_text(&stats, &bot_names));
            println!();
            println!("Seed: {base_seed}");
            println!("Duration: {elapsed:.2}s ({games_per_sec:.0} games/sec)");
        }
        TournamentFormat::Json => {
            let json = JsonSeriesResult::from_stats(&stats, &bot_names);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        TournamentFormat::Csv => {
            print!("{}", format_series_csv(&stats, &bot_names));
        }
    }

    Ok(())
}
