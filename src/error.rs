//! Error types for loading rulesets and bots.
//!
//! Nothing here is reachable from a running match: the engine drops bad
//! actions instead of failing.

use std::fmt;
use std::path::PathBuf;

/// Failure to load or validate a ruleset.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The text is not a well-formed ruleset.
    Parse(String),
    /// The ruleset parsed but breaks one or more constraints.
    Invalid(Vec<String>),
    /// The file extension is neither `.toml` nor `.json`.
    UnsupportedFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read ruleset: {e}"),
            Self::Parse(msg) => write!(f, "cannot parse ruleset: {msg}"),
            Self::Invalid(problems) => {
                write!(f, "invalid ruleset: {}", problems.join("; "))
            }
            Self::UnsupportedFormat(path) => {
                write!(f, "unsupported ruleset format: {path} (expected .toml or .json)")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Failure to resolve a bot specification.
#[derive(Debug)]
pub enum BotError {
    /// Not a built-in strategy name and not a script path.
    UnknownBot(String),
    /// The script file could not be read.
    ScriptIo {
        /// Script location.
        path: PathBuf,
        /// Underlying error.
        error: std::io::Error,
    },
    /// The script file is not a JSON list of actions.
    ScriptParse {
        /// Script location.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBot(name) => write!(
                f,
                "unknown bot '{name}' (expected idle, turret-builder, invader-army, \
                 random[:SEED] or a .json script)"
            ),
            Self::ScriptIo { path, error } => {
                write!(f, "cannot read script {}: {error}", path.display())
            }
            Self::ScriptParse { path, message } => {
                write!(f, "bad script {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ScriptIo { error, .. } => Some(error),
            _ => None,
        }
    }
}
