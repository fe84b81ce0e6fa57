//! Game invariants - sanity checks that detect engine bugs.
//!
//! None of these should ever trigger. Bots cannot reach them because every
//! action is validated before it touches state.

use crate::game::{GameState, LANE_LEN, Side};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if state.turn() > state.ruleset().max_turns {
        violations.push(violation(format!(
            "turn {} exceeds cap {}",
            state.turn(),
            state.ruleset().max_turns
        )));
    }

    for side in Side::BOTH {
        check_lane(state, side, &mut violations);
        check_economy(state, side, &mut violations);
    }

    violations
}

fn check_lane(state: &GameState, side: Side, violations: &mut Vec<InvariantViolation>) {
    let lane = state.lane(side);

    for pos in 0..LANE_LEN {
        if let Some(invader) = lane.invader(pos) {
            if invader.position() != pos {
                violations.push(violation(format!(
                    "{side} invader in slot {pos} records position {}",
                    invader.position()
                )));
            }
            if invader.health() <= 0 {
                violations.push(violation(format!(
                    "{side} invader in slot {pos} is dead but still in the lane"
                )));
            }
            if invader.health() > invader.max_health() {
                violations.push(violation(format!(
                    "{side} invader in slot {pos} has health {} > max {}",
                    invader.health(),
                    invader.max_health()
                )));
            }
            if invader.stun_remaining() < 0 {
                violations.push(violation(format!(
                    "{side} invader in slot {pos} has negative stun"
                )));
            }
        }

        if let Some(tower) = lane.tower(pos) {
            if tower.position() != pos {
                violations.push(violation(format!(
                    "tower in {side} lane slot {pos} records position {}",
                    tower.position()
                )));
            }
            if tower.level() < 1 || tower.cooldown() < 0 {
                violations.push(violation(format!(
                    "tower in {side} lane slot {pos} has level {} cooldown {}",
                    tower.level(),
                    tower.cooldown()
                )));
            }
            if tower.power() < 1 || tower.range() < 0 {
                violations.push(violation(format!(
                    "tower in {side} lane slot {pos} has power {} range {}",
                    tower.power(),
                    tower.range()
                )));
            }
        }
    }
}

fn check_economy(state: &GameState, side: Side, violations: &mut Vec<InvariantViolation>) {
    let economy = state.economy(side);

    if economy.gold() < 0 {
        violations.push(violation(format!("{side} gold is negative: {}", economy.gold())));
    }
    if economy.boost_cap() < 0 {
        violations.push(violation(format!(
            "{side} boost cap is negative: {}",
            economy.boost_cap()
        )));
    }

    // A side's towers stand in the opponent's lane.
    let standing: i64 = state
        .lane(side.opponent())
        .towers()
        .map(|t| t.inflation_contributed())
        .sum();
    if economy.inflation() != standing {
        violations.push(violation(format!(
            "{side} inflation {} does not match standing towers {standing}",
            economy.inflation()
        )));
    }
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
