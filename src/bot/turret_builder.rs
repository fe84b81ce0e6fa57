//! Defensive strategy: fill tower slots in order, then upgrade them.

use crate::bot::{Bot, Fuel, OutOfFuel};
use crate::game::{Action, LANE_LEN, Stat, TowerKind, TurnView};

/// First slot the builder fills.
const FIRST_SLOT: usize = 30;

/// Builds one tower per affordable turn, walking the lane from slot 30 and
/// wrapping around. After 100 builds it cycles through the lane again
/// upgrading power.
#[derive(Debug, Clone, Copy)]
pub struct TurretBuilder {
    next: usize,
    built: usize,
}

impl TurretBuilder {
    /// Fresh builder starting at slot 30.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: FIRST_SLOT,
            built: 0,
        }
    }

    /// Kind placed at `pos`: a bomb at 32, stunners on every third slot
    /// except 31, turrets elsewhere.
    #[must_use]
    pub const fn kind_for(pos: usize) -> TowerKind {
        if pos % 3 == 1 && pos != 31 {
            TowerKind::Stunner
        } else if pos == 32 {
            TowerKind::Bomb
        } else {
            TowerKind::Turret
        }
    }

    fn advance(&mut self) {
        self.next = (self.next + 1) % LANE_LEN;
    }
}

impl Default for TurretBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for TurretBuilder {
    fn name(&self) -> &str {
        "turret-builder"
    }

    fn decide(&mut self, view: &TurnView<'_>, fuel: &mut Fuel) -> Result<Option<Action>, OutOfFuel> {
        fuel.consume(1)?;

        if self.built < LANE_LEN {
            if !view.can_afford(view.build_cost()) {
                return Ok(None);
            }
            let action = Action::build(Self::kind_for(self.next), self.next);
            self.advance();
            self.built += 1;
            if self.built == LANE_LEN {
                self.next = 0;
            }
            return Ok(Some(action));
        }

        if !view.can_afford(view.upgrade_cost()) {
            return Ok(None);
        }
        let action = Action::upgrade(self.next, Stat::Power);
        self.advance();
        Ok(Some(action))
    }
}
