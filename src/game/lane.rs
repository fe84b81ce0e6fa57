//! Lanes: one side's corridor of invader and tower slots.
//!
//! All mutation during a tick goes through [`Lane::step`], which runs the
//! tower pass and then the movement pass over the lane's own arrays.

use crate::game::{Invader, Ruleset, Side, Strike, Tower, TowerKind};

/// Number of slots in a lane.
pub const LANE_LEN: usize = 100;

/// Index of the slot from which invaders breach.
pub const LAST_SLOT: usize = LANE_LEN - 1;

/// Result of resolving one lane tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneOutcome {
    /// Kill rewards earned by the towers in this lane.
    pub strike: Strike,
    /// The invader that breached this tick, if any.
    pub breach: Option<Invader>,
}

/// One side's lane: 100 invader slots and 100 tower slots.
#[derive(Debug, Clone, Copy)]
pub struct Lane {
    side: Side,
    invaders: [Option<Invader>; LANE_LEN],
    towers: [Option<Tower>; LANE_LEN],
}

impl Lane {
    /// Create an empty lane for `side`'s invaders.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            invaders: [None; LANE_LEN],
            towers: [None; LANE_LEN],
        }
    }

    /// Side whose invaders march in this lane.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Side whose towers defend this lane.
    #[must_use]
    pub const fn defender(&self) -> Side {
        self.side.opponent()
    }

    /// Invader at `position`, if any. Out-of-range positions are empty.
    #[must_use]
    pub fn invader(&self, position: usize) -> Option<&Invader> {
        self.invaders.get(position).and_then(Option::as_ref)
    }

    /// Tower at `position`, if any. Out-of-range positions are empty.
    #[must_use]
    pub fn tower(&self, position: usize) -> Option<&Tower> {
        self.towers.get(position).and_then(Option::as_ref)
    }

    /// All invaders, nearest to spawn first.
    pub fn invaders(&self) -> impl Iterator<Item = &Invader> {
        self.invaders.iter().flatten()
    }

    /// All towers, lowest slot first.
    pub fn towers(&self) -> impl Iterator<Item = &Tower> {
        self.towers.iter().flatten()
    }

    /// Number of invaders in the lane.
    #[must_use]
    pub fn invader_count(&self) -> usize {
        self.invaders().count()
    }

    /// Number of towers in the lane.
    #[must_use]
    pub fn tower_count(&self) -> usize {
        self.towers().count()
    }

    /// Number of towers of `kind` in the lane.
    #[must_use]
    pub fn count_towers(&self, kind: TowerKind) -> usize {
        self.towers().filter(|t| t.kind() == kind).count()
    }

    /// Whether a new invader can be placed at slot 0.
    #[must_use]
    pub fn is_spawn_clear(&self) -> bool {
        self.invaders[0].is_none()
    }

    /// First empty tower slot at or after `from`, if any.
    #[must_use]
    pub fn next_free_tower_slot(&self, from: usize) -> Option<usize> {
        (from..LANE_LEN).find(|&pos| self.towers[pos].is_none())
    }

    /// Place `invader` at slot 0. Returns `false` if the slot is taken.
    pub(crate) fn spawn(&mut self, mut invader: Invader) -> bool {
        if !self.is_spawn_clear() {
            return false;
        }
        invader.position = 0;
        self.invaders[0] = Some(invader);
        true
    }

    /// Place `tower` at its own position. Returns `false` if the slot is
    /// taken or out of range.
    pub(crate) fn place_tower(&mut self, tower: Tower) -> bool {
        let Some(slot) = self.towers.get_mut(tower.position) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(tower);
        true
    }

    /// Mutable access to the tower at `position`.
    pub(crate) fn tower_mut(&mut self, position: usize) -> Option<&mut Tower> {
        self.towers.get_mut(position).and_then(Option::as_mut)
    }

    /// Remove and return the tower at `position`.
    pub(crate) fn remove_tower(&mut self, position: usize) -> Option<Tower> {
        self.towers.get_mut(position).and_then(Option::take)
    }

    /// Resolve one tick: every tower acts in ascending slot order, then
    /// invaders move from the far end back toward spawn.
    pub fn step(&mut self, ruleset: &Ruleset) -> LaneOutcome {
        let strike = self.resolve_towers(ruleset);
        let breach = self.advance_invaders();
        LaneOutcome { strike, breach }
    }

    fn resolve_towers(&mut self, ruleset: &Ruleset) -> Strike {
        let mut strike = Strike::default();
        for tower in self.towers.iter_mut().flatten() {
            strike += tower.act(&mut self.invaders, ruleset);
        }
        strike
    }

    /// Moving the farthest invader first lets the one behind it take the
    /// freed slot in the same tick. Only the last slot can breach, so at
    /// most one invader leaves per tick.
    fn advance_invaders(&mut self) -> Option<Invader> {
        let mut breach = None;

        for pos in (0..LANE_LEN).rev() {
            let Some(invader) = self.invaders[pos].as_mut() else {
                continue;
            };

            if invader.is_stunned() {
                invader.tick_stun();
                continue;
            }

            if pos == LAST_SLOT {
                breach = self.invaders[pos].take();
            } else if self.invaders[pos + 1].is_none() {
                if let Some(mut moving) = self.invaders[pos].take() {
                    moving.position = pos + 1;
                    self.invaders[pos + 1] = Some(moving);
                }
            }
        }

        breach
    }

    /// Place an invader directly at `position`, bypassing spawn rules.
    #[cfg(test)]
    pub(crate) fn insert_invader(&mut self, position: usize, mut invader: Invader) {
        invader.position = position;
        self.invaders[position] = Some(invader);
    }

    /// Mutable access to the invader at `position`.
    #[cfg(test)]
    pub(crate) fn invader_mut(&mut self, position: usize) -> Option<&mut Invader> {
        self.invaders.get_mut(position).and_then(Option::as_mut)
    }
}
