//! Bot interface and the built-in strategies.
//!
//! A bot sees a [`TurnView`] once per turn and answers with at most one
//! [`Action`]. Strategies keep whatever private state they need in their
//! own struct; the engine only ever calls [`Bot::decide`].
//!
//! Work done while deciding is metered with [`Fuel`]. A strategy charges
//! the meter as it goes, and running dry ends its turn with no action.

mod invader_army;
mod random;
mod scripted;
mod turret_builder;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::BotError;
use crate::game::{Action, TurnView};

pub use invader_army::InvaderArmy;
pub use random::RandomBot;
pub use scripted::Scripted;
pub use turret_builder::TurretBuilder;

/// Default fuel granted to a bot per turn.
pub const DEFAULT_FUEL: u64 = 100_000;

/// A strategy for one side.
pub trait Bot: Send {
    /// Display name for reports.
    fn name(&self) -> &str;

    /// Choose this turn's action, or `None` to pass.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfFuel`] if the strategy exhausts its fuel; the engine
    /// treats that as no action.
    fn decide(&mut self, view: &TurnView<'_>, fuel: &mut Fuel) -> Result<Option<Action>, OutOfFuel>;
}

/// The bot ran out of fuel this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfFuel {
    /// Fuel the turn started with.
    pub limit: u64,
}

impl fmt::Display for OutOfFuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fuel exhausted (limit {})", self.limit)
    }
}

impl std::error::Error for OutOfFuel {}

/// Per-turn fuel meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fuel {
    limit: Option<u64>,
    used: u64,
}

impl Fuel {
    /// A meter with `limit` units, or unlimited when `None`.
    #[must_use]
    pub const fn new(limit: Option<u64>) -> Self {
        Self { limit, used: 0 }
    }

    /// A meter that never runs out.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self::new(None)
    }

    /// Charge `amount` units.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfFuel`] once the total charged exceeds the limit.
    pub fn consume(&mut self, amount: u64) -> Result<(), OutOfFuel> {
        self.used = self.used.saturating_add(amount);
        match self.limit {
            Some(limit) if self.used > limit => Err(OutOfFuel { limit }),
            _ => Ok(()),
        }
    }

    /// Units charged so far.
    #[must_use]
    pub const fn used(&self) -> u64 {
        self.used
    }

    /// Units left, or `None` when unlimited.
    #[must_use]
    pub const fn remaining(&self) -> Option<u64> {
        match self.limit {
            Some(limit) => Some(limit.saturating_sub(self.used)),
            None => None,
        }
    }
}

/// Resource limits applied to every bot call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotBudget {
    /// Fuel per turn; `None` disables metering.
    pub fuel: Option<u64>,
    /// Wall-clock limit per turn; `None` disables it.
    ///
    /// Checked once `decide` returns: an over-time action is dropped, but
    /// the call itself is never interrupted. Only `fuel` bounds the work a
    /// bot does, and only for bots that spend it. A wall-clock limit also
    /// makes results depend on the host.
    pub time_limit: Option<Duration>,
}

impl Default for BotBudget {
    fn default() -> Self {
        Self {
            fuel: Some(DEFAULT_FUEL),
            time_limit: None,
        }
    }
}

/// A bot that never acts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Bot for Idle {
    fn name(&self) -> &str {
        "idle"
    }

    fn decide(&mut self, _view: &TurnView<'_>, fuel: &mut Fuel) -> Result<Option<Action>, OutOfFuel> {
        fuel.consume(1)?;
        Ok(None)
    }
}

/// A bot named on the command line.
///
/// Parses `idle`, `turret-builder`, `invader-army`, `random`,
/// `random:SEED`, or a path to a `.json` script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotSpec {
    /// [`Idle`].
    Idle,
    /// [`TurretBuilder`].
    TurretBuilder,
    /// [`InvaderArmy`].
    InvaderArmy,
    /// [`RandomBot`] with a fixed seed, or the match seed when `None`.
    Random(Option<u64>),
    /// [`Scripted`] loaded from a file.
    Scripted(PathBuf),
}

impl BotSpec {
    /// Instantiate the bot. `seed` feeds strategies that need randomness
    /// and did not name their own.
    ///
    /// # Errors
    ///
    /// Returns an error if a script cannot be loaded.
    pub fn build(&self, seed: u64) -> Result<Box<dyn Bot>, BotError> {
        Ok(match self {
            Self::Idle => Box::new(Idle),
            Self::TurretBuilder => Box::new(TurretBuilder::new()),
            Self::InvaderArmy => Box::new(InvaderArmy::new()),
            Self::Random(own) => Box::new(RandomBot::new(own.unwrap_or(seed))),
            Self::Scripted(path) => Box::new(Scripted::load(path)?),
        })
    }

    /// Short label for reports.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Idle => "idle".to_string(),
            Self::TurretBuilder => "turret-builder".to_string(),
            Self::InvaderArmy => "invader-army".to_string(),
            Self::Random(None) => "random".to_string(),
            Self::Random(Some(seed)) => format!("random:{seed}"),
            Self::Scripted(path) => path
                .file_name()
                .map_or_else(|| "script".to_string(), |n| n.to_string_lossy().to_string()),
        }
    }
}

impl FromStr for BotSpec {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => return Ok(Self::Idle),
            "turret-builder" | "turrets" => return Ok(Self::TurretBuilder),
            "invader-army" | "army" => return Ok(Self::InvaderArmy),
            "random" => return Ok(Self::Random(None)),
            _ => {}
        }
        if let Some(seed) = s.strip_prefix("random:") {
            let seed = seed
                .parse()
                .map_err(|_| BotError::UnknownBot(s.to_string()))?;
            return Ok(Self::Random(Some(seed)));
        }
        if s.ends_with(".json") {
            return Ok(Self::Scripted(PathBuf::from(s)));
        }
        Err(BotError::UnknownBot(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Ruleset, Side};

    #[test]
    fn test_fuel_limit() {
        let mut fuel = Fuel::new(Some(10));
        assert!(fuel.consume(6).is_ok());
        assert_eq!(fuel.remaining(), Some(4));
        assert!(fuel.consume(4).is_ok());
        assert_eq!(fuel.consume(1), Err(OutOfFuel { limit: 10 }));
        assert_eq!(fuel.remaining(), Some(0));
    }

    #[test]
    fn test_unlimited_fuel() {
        let mut fuel = Fuel::unlimited();
        assert!(fuel.consume(u64::MAX).is_ok());
        assert!(fuel.consume(u64::MAX).is_ok());
        assert_eq!(fuel.remaining(), None);
        assert_eq!(fuel.used(), u64::MAX);
    }

    #[test]
    fn test_idle_passes() {
        let game = GameState::new(Ruleset::default());
        let mut bot = Idle;
        let decision = bot.decide(&game.view(Side::Left), &mut Fuel::unlimited());
        assert_eq!(decision, Ok(None));
    }

    #[test]
    fn test_parse_specs() {
        assert_eq!("idle".parse::<BotSpec>().unwrap(), BotSpec::Idle);
        assert_eq!("turret-builder".parse::<BotSpec>().unwrap(), BotSpec::TurretBuilder);
        assert_eq!("army".parse::<BotSpec>().unwrap(), BotSpec::InvaderArmy);
        assert_eq!("random".parse::<BotSpec>().unwrap(), BotSpec::Random(None));
        assert_eq!("random:7".parse::<BotSpec>().unwrap(), BotSpec::Random(Some(7)));
        assert_eq!(
            "bots/rush.json".parse::<BotSpec>().unwrap(),
            BotSpec::Scripted(PathBuf::from("bots/rush.json"))
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("laser".parse::<BotSpec>().is_err());
        assert!("random:x".parse::<BotSpec>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(BotSpec::Random(Some(3)).label(), "random:3");
        assert_eq!(BotSpec::Scripted(PathBuf::from("a/b.json")).label(), "b.json");
    }
}
