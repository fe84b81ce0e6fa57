#![no_main]

//! Full turn fuzzer.
//!
//! Drives the engine with bots that replay fuzzer-chosen actions, so
//! arbitrary (and mostly invalid) requests flow through every phase of
//! the turn: lane resolution, income, growth, actions and game-over.

use arbitrary::Arbitrary;
use lanewar::bot::Scripted;
use lanewar::game::invariants::check_invariants;
use lanewar::game::{Action, Ruleset, Side, Stat, TowerKind};
use lanewar::Engine;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    Pass,
    Spawn { hp: i8, defense: i8, stun_res: i8 },
    Build { kind: u8, pos: u8 },
    Upgrade { pos: u8, range: bool },
    Destroy { pos: u8 },
}

impl FuzzAction {
    fn to_action(self) -> Option<Action> {
        match self {
            Self::Pass => None,
            Self::Spawn { hp, defense, stun_res } => Some(Action::spawn(
                i32::from(hp),
                i32::from(defense),
                i32::from(stun_res),
            )),
            Self::Build { kind, pos } => Some(Action::build(
                TowerKind::ALL[usize::from(kind) % TowerKind::ALL.len()],
                usize::from(pos),
            )),
            Self::Upgrade { pos, range } => Some(Action::upgrade(
                usize::from(pos),
                if range { Stat::Range } else { Stat::Power },
            )),
            Self::Destroy { pos } => Some(Action::destroy(usize::from(pos))),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct MatchInput {
    left: Vec<FuzzAction>,
    right: Vec<FuzzAction>,
    initial_gold: u16,
    initial_life: u8,
    logarithmic: bool,
    max_turns: u16,
}

fuzz_target!(|input: MatchInput| {
    let base = if input.logarithmic {
        Ruleset::logarithmic()
    } else {
        Ruleset::inflationary()
    };
    let ruleset = Ruleset {
        initial_gold: i64::from(input.initial_gold),
        initial_life: i32::from(input.initial_life.max(1)),
        max_turns: u32::from(input.max_turns % 1_000).max(1),
        ..base
    };
    let script = |actions: &[FuzzAction]| {
        let script = actions.iter().take(500).map(|a| a.to_action()).collect();
        Box::new(Scripted::new("fuzz", script))
    };
    let mut engine = Engine::new(ruleset, script(&input.left), script(&input.right));

    let mut last_turn = 0;
    loop {
        let running = engine.step();
        let state = engine.state();

        let violations = check_invariants(state);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");
        assert_eq!(state.turn(), last_turn + 1, "turn skipped");
        last_turn = state.turn();

        for side in Side::BOTH {
            assert!(state.economy(side).gold() >= 0);
        }
        if !running {
            break;
        }
    }

    let over = engine.state().game_over().copied();
    assert!(over.is_some(), "loop ended without a game over");
});
