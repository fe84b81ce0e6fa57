//! CLI command implementations for Lanewar.

pub(crate) mod run;
pub(crate) mod tournament;
pub(crate) mod validate;

mod output;

use clap::{Args, ValueEnum};
use lanewar::{BotBudget, BotError, BotSpec, ConfigError, MatchConfig, Ruleset};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Built-in ruleset presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    /// Fixed growth with build-cost inflation.
    Inflationary,
    /// Logarithmic growth without inflation.
    Logarithmic,
}

/// Ruleset and budget options shared by `run` and `tournament`.
#[derive(Args, Debug, Clone)]
pub(crate) struct RulesArgs {
    /// Ruleset preset
    #[arg(short, long, default_value = "inflationary")]
    ruleset: Preset,

    /// Ruleset file (.toml or .json); overrides --ruleset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum turns per game
    #[arg(short = 't', long)]
    turns: Option<u32>,

    /// Fuel per bot per turn (0 disables metering)
    #[arg(long)]
    fuel: Option<u64>,

    /// Wall-clock limit per bot per turn, in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

impl RulesArgs {
    /// Resolve the options into a match configuration.
    pub(crate) fn match_config(&self) -> Result<MatchConfig, CliError> {
        let mut ruleset = match &self.config {
            Some(path) => Ruleset::from_path(path)?,
            None => match self.ruleset {
                Preset::Inflationary => Ruleset::inflationary(),
                Preset::Logarithmic => Ruleset::logarithmic(),
            },
        };
        if let Some(turns) = self.turns {
            ruleset.max_turns = turns;
            ruleset.validate()?;
        }

        let mut budget = BotBudget::default();
        if let Some(fuel) = self.fuel {
            budget.fuel = (fuel > 0).then_some(fuel);
        }
        budget.time_limit = self.time_limit_ms.map(Duration::from_millis);

        tracing::debug!(?ruleset, ?budget, "match configuration");
        Ok(MatchConfig { ruleset, budget })
    }
}

/// Parse a bot argument.
pub(crate) fn parse_bot(arg: &str) -> Result<BotSpec, CliError> {
    Ok(arg.parse::<BotSpec>()?)
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BotError> for CliError {
    fn from(e: BotError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
