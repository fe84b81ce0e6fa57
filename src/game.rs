//! Game layer: lanes, towers, invaders and the two economies.
//!
//! - Two lanes, one per side, each with 100 invader and 100 tower slots
//! - Towers stand in the lane they defend; their owner is the lane's opponent
//! - Economy with income ticks, growth ticks and build-cost inflation
//! - Per-turn reports that account for every gold and life change

mod action;
mod economy;
mod invader;
pub mod invariants;
mod lane;
mod report;
mod ruleset;
mod side;
mod state;
mod tower;
mod view;

pub use action::{Action, Rejection};
pub use economy::{Economy, Growth, GrowthLaw, GrowthStep};
pub use invader::Invader;
pub use lane::{LANE_LEN, LAST_SLOT, Lane, LaneOutcome};
pub use report::{ActionRecord, SideReport, SideTotals, TurnReport};
pub use ruleset::{
    BreachPayout, BreachReward, InvaderRules, Ruleset, TowerCatalog, TowerCosts, TowerTemplate,
};
pub use side::Side;
pub use state::{EndReason, GameOver, GameState};
pub use tower::{Stat, Strike, Tower, TowerKind};
pub use view::TurnView;
