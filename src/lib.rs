// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Lanewar: a deterministic two-lane invader/tower simulation for bot
//! competitions.
//!
//! Each side sends invaders down its own 100-slot lane while the opponent
//! builds towers along it. Bots observe a read-only [`game::TurnView`] and
//! return at most one [`game::Action`] per turn; invalid actions are
//! dropped, never fatal.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Series runner (rayon)             │
//! ├─────────────────────────────────────┤
//! │   Engine: turn loop, bot budgets    │
//! ├─────────────────────────────────────┤
//! │   Game: lanes, towers, economies    │
//! └─────────────────────────────────────┘
//! ```

pub mod bot;
pub mod engine;
pub mod error;
pub mod game;
pub mod tournament;

pub use bot::{Bot, BotBudget, BotSpec, Fuel, OutOfFuel};
pub use engine::Engine;
pub use error::{BotError, ConfigError};

// Re-export key game types at crate root for convenience
pub use game::{Action, GameOver, GameState, Ruleset, Side, TowerKind, TurnReport, TurnView};
pub use tournament::{MatchConfig, MatchResult, SeriesStats, run_match, run_series};
