//! Offensive strategy: a short fixed opening, then a stream of invaders.

use crate::bot::{Bot, Fuel, OutOfFuel};
use crate::game::{Action, Stat, TowerKind, TurnView};

/// Actions for turns 1 through 13.
const OPENING: [Option<Action>; 13] = [
    Some(Action::build(TowerKind::Turret, 30)),
    Some(Action::build(TowerKind::Turret, 32)),
    Some(Action::build(TowerKind::Stunner, 31)),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some(Action::upgrade(30, Stat::Power)),
    Some(Action::upgrade(32, Stat::Power)),
];

/// Plays the opening, then spawns an invader with the whole boost cap
/// spent on health whenever it can pay for one.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvaderArmy;

impl InvaderArmy {
    /// New army strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Bot for InvaderArmy {
    fn name(&self) -> &str {
        "invader-army"
    }

    fn decide(&mut self, view: &TurnView<'_>, fuel: &mut Fuel) -> Result<Option<Action>, OutOfFuel> {
        fuel.consume(1)?;

        let opening = usize::try_from(view.turn)
            .ok()
            .and_then(|turn| turn.checked_sub(1))
            .and_then(|index| OPENING.get(index));
        if let Some(action) = opening {
            return Ok(*action);
        }

        let hp = i32::try_from(view.own.boost_cap()).unwrap_or(i32::MAX);
        if view.can_afford(view.spawn_cost(hp, 0, 0)) {
            return Ok(Some(Action::spawn(hp, 0, 0)));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Ruleset, Side};

    fn decide_on_turn(game: &mut GameState, turn: u32) -> Option<Action> {
        while game.turn() < turn {
            game.advance_turn();
        }
        InvaderArmy::new()
            .decide(&game.view(Side::Right), &mut Fuel::unlimited())
            .unwrap()
    }

    #[test]
    fn test_opening_moves() {
        let mut game = GameState::new(Ruleset::default());
        assert_eq!(decide_on_turn(&mut game, 1), Some(Action::build(TowerKind::Turret, 30)));
        assert_eq!(decide_on_turn(&mut game, 3), Some(Action::build(TowerKind::Stunner, 31)));
        assert_eq!(decide_on_turn(&mut game, 4), None);
        assert_eq!(decide_on_turn(&mut game, 13), Some(Action::upgrade(32, Stat::Power)));
    }

    #[test]
    fn test_spawns_after_opening() {
        let mut game = GameState::new(Ruleset::default());
        assert_eq!(decide_on_turn(&mut game, 14), Some(Action::spawn(0, 0, 0)));
    }
}
