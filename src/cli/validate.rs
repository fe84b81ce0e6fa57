//! Validation command implementation.

use super::CliError;
use lanewar::Ruleset;
use lanewar::bot::Scripted;
use std::path::Path;

/// Execute the validate command.
///
/// A `.json` file whose top level is an array is checked as a script even
/// without `script`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid.
pub(crate) fn execute(file: &Path, script: bool) -> Result<(), CliError> {
    println!("Validating: {}", file.display());
    println!();

    if script || looks_like_script(file) {
        validate_script(file)
    } else {
        validate_ruleset(file)
    }
}

fn validate_ruleset(file: &Path) -> Result<(), CliError> {
    let ruleset = match Ruleset::from_path(file) {
        Ok(ruleset) => ruleset,
        Err(e) => {
            print_check("Ruleset", false);
            return Err(e.into());
        }
    };
    print_check("Ruleset", true);

    println!();
    println!("Summary:");
    println!("  Starting gold:  {}", ruleset.initial_gold);
    println!("  Starting life:  {}", ruleset.initial_life);
    println!("  Income:         {} every {} turns", ruleset.initial_income, ruleset.income_interval);
    println!("  Growth:         {:?} every {} turns", ruleset.growth, ruleset.growth_interval);
    println!("  Turn cap:       {}", ruleset.max_turns);
    println!();
    println!("Validation successful!");

    Ok(())
}

fn validate_script(file: &Path) -> Result<(), CliError> {
    let bot = match Scripted::load(file) {
        Ok(bot) => bot,
        Err(e) => {
            print_check("Script", false);
            return Err(e.into());
        }
    };
    print_check("Script", true);

    println!();
    println!("Summary:");
    println!("  Turns:    {}", bot.len());
    println!("  Actions:  {}", bot.action_count());
    println!();
    println!("Validation successful!");

    Ok(())
}

/// Scripts are JSON arrays; rulesets are objects or TOML tables.
fn looks_like_script(file: &Path) -> bool {
    let is_json = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    is_json
        && std::fs::read_to_string(file).is_ok_and(|text| text.trim_start().starts_with('['))
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_json_array_is_a_script() {
        let file = temp_file(".json", "\n  [{\"action\": \"spawn\"}]");
        assert!(looks_like_script(file.path()));
        assert!(execute(file.path(), false).is_ok());
    }

    #[test]
    fn test_json_object_is_a_ruleset() {
        let file = temp_file(".json", r#"{"initial_life": 3}"#);
        assert!(!looks_like_script(file.path()));
        assert!(execute(file.path(), false).is_ok());
    }

    #[test]
    fn test_toml_table_header_is_a_ruleset() {
        let file = temp_file(".toml", "[growth]\nlaw = \"fixed\"\nincome = 1\nboost = 0\n");
        assert!(!looks_like_script(file.path()));
        assert!(execute(file.path(), false).is_ok());
    }

    #[test]
    fn test_script_flag_forces_script_check() {
        let file = temp_file(".json", r#"{"initial_life": 3}"#);
        assert!(execute(file.path(), true).is_err());
    }

    #[test]
    fn test_missing_file_is_not_a_script() {
        assert!(!looks_like_script(Path::new("/nonexistent/script.json")));
    }
}
