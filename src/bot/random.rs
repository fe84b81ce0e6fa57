//! Seeded random strategy, useful as a fuzzing opponent.

use crate::bot::{Bot, Fuel, OutOfFuel};
use crate::game::{Action, Stat, TowerKind, TurnView};

/// Xorshift64 generator. Deterministic for a given seed.
#[derive(Debug, Clone)]
struct Rng {
    state: u64,
}

impl Rng {
    const fn new(seed: u64) -> Self {
        // Xorshift never leaves the all-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in `[0, bound)`, or 0 when `bound` is 0.
    fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.next_u64() % bound
    }

    #[allow(clippy::cast_possible_truncation)]
    fn index(&mut self, len: usize) -> usize {
        self.below(len as u64) as usize
    }

    /// Random boost in `[0, cap]`.
    fn boost(&mut self, cap: i64) -> i32 {
        let cap = u64::try_from(cap.clamp(0, i64::from(i32::MAX))).unwrap_or(0);
        i32::try_from(self.below(cap + 1)).unwrap_or(0)
    }
}

/// Collects every affordable action of each verb, then picks one at
/// random. Passes about a quarter of the time even when it could act.
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: Rng,
    name: String,
}

impl RandomBot {
    /// Random bot seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            name: format!("random:{seed}"),
        }
    }

    fn spawn_option(&mut self, view: &TurnView<'_>) -> Option<Action> {
        if !view.attacking.is_spawn_clear() {
            return None;
        }
        let cap = view.own.boost_cap();
        let hp = self.rng.boost(cap);
        let defense = self.rng.boost(cap - i64::from(hp));
        let stun_res = self.rng.boost(cap - i64::from(hp) - i64::from(defense));
        view.can_afford(view.spawn_cost(hp, defense, stun_res))
            .then_some(Action::spawn(hp, defense, stun_res))
    }

    fn build_option(&mut self, view: &TurnView<'_>) -> Option<Action> {
        if !view.can_afford(view.build_cost()) {
            return None;
        }
        let start = self.rng.index(crate::game::LANE_LEN);
        let pos = view
            .defending
            .next_free_tower_slot(start)
            .or_else(|| view.defending.next_free_tower_slot(0))?;
        let kind = TowerKind::ALL[self.rng.index(TowerKind::ALL.len())];
        Some(Action::build(kind, pos))
    }

    fn upgrade_option(&mut self, view: &TurnView<'_>) -> Option<Action> {
        let count = view.defending.tower_count();
        if count == 0 || !view.can_afford(view.upgrade_cost()) {
            return None;
        }
        let tower = view.defending.towers().nth(self.rng.index(count))?;
        let stat = if self.rng.below(2) == 0 {
            Stat::Power
        } else {
            Stat::Range
        };
        Some(Action::upgrade(tower.position(), stat))
    }

    fn destroy_option(&mut self, view: &TurnView<'_>) -> Option<Action> {
        let count = view.defending.tower_count();
        if count == 0 || self.rng.below(50) != 0 {
            return None;
        }
        let tower = view.defending.towers().nth(self.rng.index(count))?;
        Some(Action::destroy(tower.position()))
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, view: &TurnView<'_>, fuel: &mut Fuel) -> Result<Option<Action>, OutOfFuel> {
        fuel.consume(1)?;

        let options: Vec<Action> = [
            self.spawn_option(view),
            self.build_option(view),
            self.upgrade_option(view),
            self.destroy_option(view),
        ]
        .into_iter()
        .flatten()
        .collect();
        fuel.consume(options.len() as u64)?;

        if options.is_empty() || self.rng.below(4) == 0 {
            return Ok(None);
        }
        Ok(Some(options[self.rng.index(options.len())]))
    }
}
