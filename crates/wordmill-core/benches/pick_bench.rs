//! Wordmill Pick Benchmarks
//!
//! Benchmarks for core selection operations using Criterion.
//! Run with: cargo bench -p wordmill-core

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wordmill_core::{strategy, Complexity, Pool, SlotFactory, Word, WordEntry, WordKind, WordRef};

fn vocabulary(n: usize) -> Vec<WordRef> {
    let now = Utc::now();
    let tiers = Complexity::ORDERED;
    (0..n)
        .map(|i| {
            let entry = WordEntry::with_key(&format!("word-{i}"), &format!("übersetzung-{i}"));
            entry.set_complexity(tiers[i % tiers.len()]);
            entry.set_last_picked(now - Duration::hours((i % 48) as i64));
            entry.into_ref()
        })
        .collect()
}

fn bench_uniform_pick(c: &mut Criterion) {
    let now = Utc::now();
    let pool = Pool::new();
    pool.add_all(vocabulary(1_000));

    c.bench_function("uniform_pick_1k", |b| {
        b.iter(|| {
            black_box(pool.pick(now, None));
        })
    });
}

fn bench_weighted_pick(c: &mut Criterion) {
    let now = Utc::now();
    let pool = Pool::with_strategy(strategy::standard_everyday());
    pool.add_all(vocabulary(1_000));

    c.bench_function("weighted_pick_1k", |b| {
        b.iter(|| {
            black_box(pool.pick(now, None));
        })
    });
}

fn bench_slot_pick(c: &mut Criterion) {
    let now = Utc::now();
    let factory = SlotFactory::new();
    let slots = factory.draw_slots(WordKind::Review, 4, vocabulary(1_000), now);

    let pool = Pool::with_strategy(strategy::standard_everyday());
    pool.add_all(vocabulary(100));
    pool.add_all(slots);

    c.bench_function("pick_through_slots_1k_aux", |b| {
        b.iter(|| {
            black_box(pool.pick(now, None));
        })
    });
}

fn bench_seed_pool(c: &mut Criterion) {
    let now = Utc::now();
    let words = vocabulary(1_000);

    c.bench_function("seed_pool_1k", |b| {
        b.iter(|| {
            let pool = Pool::new();
            SlotFactory::seed_pool(words.iter().cloned(), &pool, now);
            black_box(pool.size());
        })
    });
}

criterion_group!(
    benches,
    bench_uniform_pick,
    bench_weighted_pick,
    bench_slot_pick,
    bench_seed_pool,
);
criterion_main!(benches);
