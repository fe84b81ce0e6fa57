//! Bot actions and the reasons the engine drops them.
//!
//! Actions are plain data. In JSON they are internally tagged by an
//! `"action"` field, e.g. `{"action": "build", "type": "turret", "pos": 30}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Stat, TowerKind};

/// A single request from a bot for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Send an invader into the bot's own attacking lane.
    Spawn {
        /// Extra health above the base.
        #[serde(default)]
        hp: i32,
        /// Defense points.
        #[serde(default)]
        defense: i32,
        /// Stun resistance points.
        #[serde(default, alias = "stunRes")]
        stun_res: i32,
    },
    /// Build a tower in the lane the bot defends.
    Build {
        /// Tower kind.
        #[serde(rename = "type", alias = "kind")]
        kind: TowerKind,
        /// Target slot.
        pos: usize,
    },
    /// Upgrade one stat of an existing tower.
    Upgrade {
        /// Slot of the tower.
        pos: usize,
        /// Stat to raise.
        stat: Stat,
    },
    /// Tear down a tower for a partial refund.
    Destroy {
        /// Slot of the tower.
        pos: usize,
    },
}

impl Action {
    /// Spawn with the given boosts.
    #[must_use]
    pub const fn spawn(hp: i32, defense: i32, stun_res: i32) -> Self {
        Self::Spawn {
            hp,
            defense,
            stun_res,
        }
    }

    /// Build `kind` at `pos`.
    #[must_use]
    pub const fn build(kind: TowerKind, pos: usize) -> Self {
        Self::Build { kind, pos }
    }

    /// Upgrade `stat` of the tower at `pos`.
    #[must_use]
    pub const fn upgrade(pos: usize, stat: Stat) -> Self {
        Self::Upgrade { pos, stat }
    }

    /// Destroy the tower at `pos`.
    #[must_use]
    pub const fn destroy(pos: usize) -> Self {
        Self::Destroy { pos }
    }

    /// Interpret arbitrary JSON as an action.
    ///
    /// Anything that is not a well-formed action means "no action".
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Short lowercase verb for logs.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "spawn",
            Self::Build { .. } => "build",
            Self::Upgrade { .. } => "upgrade",
            Self::Destroy { .. } => "destroy",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn {
                hp,
                defense,
                stun_res,
            } => write!(f, "spawn hp+{hp} def {defense} res {stun_res}"),
            Self::Build { kind, pos } => write!(f, "build {kind} at {pos}"),
            Self::Upgrade { pos, stat } => write!(f, "upgrade {stat:?} at {pos}"),
            Self::Destroy { pos } => write!(f, "destroy at {pos}"),
        }
    }
}

/// Why an action was dropped.
///
/// Bots never see these; the engine records them for reports and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Slot 0 of the attacking lane is occupied.
    SpawnBlocked,
    /// Requested boosts exceed the boost cap.
    BoostOverCap {
        /// Sum of requested boosts.
        requested: i64,
        /// Current cap.
        cap: i64,
    },
    /// Not enough gold.
    InsufficientGold {
        /// Price of the action.
        cost: i64,
        /// Gold available.
        gold: i64,
    },
    /// Target slot is outside the lane.
    SlotOutOfRange(usize),
    /// Target slot already has a tower.
    SlotOccupied(usize),
    /// No tower at the target slot.
    NoTower(usize),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpawnBlocked => write!(f, "spawn slot occupied"),
            Self::BoostOverCap { requested, cap } => {
                write!(f, "boost {requested} exceeds cap {cap}")
            }
            Self::InsufficientGold { cost, gold } => {
                write!(f, "costs {cost} but only {gold} gold")
            }
            Self::SlotOutOfRange(pos) => write!(f, "slot {pos} out of range"),
            Self::SlotOccupied(pos) => write!(f, "slot {pos} already has a tower"),
            Self::NoTower(pos) => write!(f, "no tower at slot {pos}"),
        }
    }
}

impl std::error::Error for Rejection {}
