//! Replays a fixed per-turn list of actions.
//!
//! Script files are a JSON array with one entry per turn, starting at turn
//! 1. Each entry is an action object or `null` to pass:
//!
//! ```json
//! [
//!   {"action": "build", "type": "turret", "pos": 30},
//!   null,
//!   {"action": "spawn", "hp": 2}
//! ]
//! ```
//!
//! Past the end of the script the bot passes.

use std::path::Path;

use crate::bot::{Bot, Fuel, OutOfFuel};
use crate::error::BotError;
use crate::game::{Action, TurnView};

/// A bot that plays back a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scripted {
    name: String,
    script: Vec<Option<Action>>,
}

impl Scripted {
    /// Script from an in-memory list.
    #[must_use]
    pub fn new(name: impl Into<String>, script: Vec<Option<Action>>) -> Self {
        Self {
            name: name.into(),
            script,
        }
    }

    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the text is not an array of actions and
    /// nulls.
    pub fn from_json_str(name: impl Into<String>, text: &str) -> Result<Self, serde_json::Error> {
        let script = serde_json::from_str(text)?;
        Ok(Self::new(name, script))
    }

    /// Load a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, BotError> {
        let text = std::fs::read_to_string(path).map_err(|error| BotError::ScriptIo {
            path: path.to_path_buf(),
            error,
        })?;
        let name = path
            .file_stem()
            .map_or_else(|| "script".to_string(), |s| s.to_string_lossy().to_string());
        Self::from_json_str(name, &text).map_err(|e| BotError::ScriptParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Number of scripted turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.script.len()
    }

    /// Whether the script has no turns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// Number of turns that carry an action.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.script.iter().flatten().count()
    }
}

impl Bot for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, view: &TurnView<'_>, fuel: &mut Fuel) -> Result<Option<Action>, OutOfFuel> {
        fuel.consume(1)?;
        let entry = usize::try_from(view.turn)
            .ok()
            .and_then(|turn| turn.checked_sub(1))
            .and_then(|index| self.script.get(index));
        Ok(entry.copied().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Ruleset, Side, TowerKind};
    use std::io::Write;

    #[test]
    fn test_parse_script_with_skips() {
        let bot = Scripted::from_json_str(
            "opening",
            r#"[{"action": "build", "type": "bomb", "pos": 40}, null, {"action": "spawn"}]"#,
        )
        .unwrap();
        assert_eq!(bot.len(), 3);
        assert_eq!(bot.action_count(), 2);
    }

    #[test]
    fn test_rejects_malformed_entries() {
        assert!(Scripted::from_json_str("bad", r#"[{"action": "fly"}]"#).is_err());
        assert!(Scripted::from_json_str("bad", r#"{"action": "spawn"}"#).is_err());
    }

    #[test]
    fn test_plays_by_turn_then_passes() {
        let mut bot = Scripted::new(
            "two",
            vec![Some(Action::build(TowerKind::Turret, 3)), None],
        );
        let mut game = GameState::new(Ruleset::default());
        let mut seen = Vec::new();
        for _ in 0..4 {
            game.advance_turn();
            seen.push(bot.decide(&game.view(Side::Left), &mut Fuel::unlimited()).unwrap());
        }
        assert_eq!(seen, vec![Some(Action::build(TowerKind::Turret, 3)), None, None, None]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[null, {{"action": "destroy", "pos": 12}}]"#).unwrap();

        let bot = Scripted::load(file.path()).unwrap();
        assert_eq!(bot.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Scripted::load(Path::new("/nonexistent/script.json")).unwrap_err();
        assert!(matches!(err, BotError::ScriptIo { .. }));
    }
}
