#![no_main]

//! Lane resolution fuzzer.
//!
//! Builds arbitrary towers with arbitrary stats in one lane, feeds it
//! invaders, and checks that lane resolution keeps every structural
//! invariant and never pays out more kills than invaders spawned.

use arbitrary::Arbitrary;
use lanewar::game::invariants::check_invariants;
use lanewar::game::{
    Action, GameState, LANE_LEN, Ruleset, Side, Stat, TowerKind, TowerTemplate, TurnReport,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct TowerInput {
    kind: u8,
    pos: u8,
    upgrades: u8,
    range_upgrade: bool,
}

#[derive(Arbitrary, Debug)]
struct LaneInput {
    /// Template stats, clamped to valid values.
    powers: [u8; 3],
    ranges: [u8; 3],
    towers: Vec<TowerInput>,
    /// Boosts for each spawned invader.
    spawns: Vec<(u8, u8, u8)>,
    ticks: u8,
}

fuzz_target!(|input: LaneInput| {
    let mut ruleset = Ruleset {
        initial_gold: 1_000_000,
        initial_boost_cap: 50,
        build_time: 0,
        upgrade_time: 0,
        ..Ruleset::default()
    };
    let template = |i: usize| TowerTemplate {
        power: i32::from(input.powers[i].max(1)),
        range: i32::from(input.ranges[i] % 8),
    };
    ruleset.towers.turret = template(0);
    ruleset.towers.stunner = template(1);
    ruleset.towers.bomb = template(2);

    let mut game = GameState::new(ruleset);

    // Right defends the left lane
    for tower in input.towers.iter().take(20) {
        let kind = TowerKind::ALL[usize::from(tower.kind) % TowerKind::ALL.len()];
        let pos = usize::from(tower.pos) % LANE_LEN;
        if game.apply_action(Side::Right, Action::build(kind, pos)).is_err() {
            continue;
        }
        let stat = if tower.range_upgrade { Stat::Range } else { Stat::Power };
        for _ in 0..(tower.upgrades % 4) {
            let _ = game.apply_action(Side::Right, Action::upgrade(pos, stat));
        }
    }

    let mut spawned = 0u32;
    let mut kills = 0u32;
    let mut breaches = 0u32;
    let mut spawns = input.spawns.iter().take(50);
    for _ in 0..(u32::from(input.ticks) + LANE_LEN as u32) {
        if let Some(&(hp, defense, stun_res)) = spawns.next() {
            let action = Action::spawn(
                i32::from(hp % 20),
                i32::from(defense % 20),
                i32::from(stun_res % 20),
            );
            if game.apply_action(Side::Left, action).is_ok() {
                spawned += 1;
            }
        }

        let mut report = TurnReport::new(game.turn() + 1);
        game.resolve_lanes(&mut report);
        kills += report.side(Side::Right).kills;
        breaches += report.side(Side::Left).breaches;

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");
        assert!(report.side(Side::Right).kill_gold >= 0);
    }

    let alive = game.lane(Side::Left).invader_count() as u32;
    assert_eq!(spawned, kills + breaches + alive, "invaders lost or duplicated");
});
