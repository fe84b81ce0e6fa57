//! Lanewar CLI - run matches and series between bots.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Lanewar - a deterministic two-lane invader/tower simulation
#[derive(Parser, Debug)]
#[command(name = "lanewar")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single match between two bots
    Run {
        /// Left bot: idle, turret-builder, invader-army, random[:SEED] or a .json script
        left: String,

        /// Right bot
        right: String,

        #[command(flatten)]
        rules: cli::RulesArgs,

        /// Seed for random bots without their own (default: 0)
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run many matches in parallel and aggregate statistics
    Tournament {
        /// Left bot
        left: String,

        /// Right bot
        right: String,

        #[command(flatten)]
        rules: cli::RulesArgs,

        /// Number of games to run
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Check a ruleset (.toml/.json) or a bot script (.json)
    Validate {
        /// File to validate
        file: PathBuf,

        /// Treat the file as a bot script (implied for a .json array)
        #[arg(long)]
        script: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "lanewar=warn",
        1 => "lanewar=debug",
        _ => "lanewar=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Run {
            left,
            right,
            rules,
            seed,
            format,
        } => cli::run::execute(&left, &right, &rules, seed, format),

        Commands::Tournament {
            left,
            right,
            rules,
            games,
            seed,
            threads,
            format,
            progress,
        } => cli::tournament::execute(&left, &right, &rules, games, seed, threads, format, progress),

        Commands::Validate { file, script } => cli::validate::execute(&file, script),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
