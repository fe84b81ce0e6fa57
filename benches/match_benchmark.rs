//! Benchmarks for running complete matches.
//!
//! The engine loop is the hot path for series runs.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use lanewar::bot::{InvaderArmy, RandomBot, TurretBuilder};
use lanewar::{BotSpec, MatchConfig, Ruleset, run_match, run_series};

fn short_config(max_turns: u32) -> MatchConfig {
    MatchConfig {
        ruleset: Ruleset {
            max_turns,
            ..Ruleset::default()
        },
        ..MatchConfig::default()
    }
}

fn bench_single_match(c: &mut Criterion) {
    let config = short_config(5_000);

    c.bench_function("turrets_vs_army_5k", |b| {
        b.iter(|| {
            let result = run_match(
                black_box(&config),
                Box::new(TurretBuilder::new()),
                Box::new(InvaderArmy::new()),
            );
            black_box(result)
        });
    });
}

fn bench_random_match(c: &mut Criterion) {
    // Random bots keep both lanes busy, so every tower kind gets exercised
    let config = short_config(2_000);

    c.bench_function("random_vs_random_2k", |b| {
        b.iter(|| {
            let result = run_match(
                black_box(&config),
                Box::new(RandomBot::new(7)),
                Box::new(RandomBot::new(8)),
            );
            black_box(result)
        });
    });
}

fn bench_series(c: &mut Criterion) {
    let config = short_config(1_000);
    let spec = BotSpec::Random(None);

    c.bench_function("series_32_games", |b| {
        b.iter(|| {
            let stats = run_series(
                black_box(&config),
                |_, seed| spec.build(seed).unwrap_or_else(|_| Box::new(RandomBot::new(seed))),
                32,
                black_box(42),
            );
            black_box(stats)
        });
    });
}

criterion_group!(benches, bench_single_match, bench_random_match, bench_series);
criterion_main!(benches);
