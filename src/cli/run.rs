//! Run command implementation.

use super::output::{JsonMatchResult, format_text};
use super::{CliError, OutputFormat, RulesArgs, parse_bot};
use lanewar::run_match;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if a bot or the ruleset cannot be loaded.
pub(crate) fn execute(
    left: &str,
    right: &str,
    rules: &RulesArgs,
    seed: u64,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = rules.match_config()?;
    let left = parse_bot(left)?.build(seed)?;
    let right = parse_bot(right)?.build(seed.wrapping_add(1))?;

    tracing::info!(left = left.name(), right = right.name(), seed, "starting match");
    let result = run_match(&config, left, right);

    match format {
        OutputFormat::Text => print!("{}", format_text(&result, seed)),
        OutputFormat::Json => {
            let json = JsonMatchResult::from_match_result(&result, seed);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
