//! Matching-engine benchmarks, grounded on the teacher's
//! `benches/mod.rs`/`benches/order_book/*.rs` criterion harness shape: one
//! `criterion_group!`/`criterion_main!` pair, each benchmark function
//! building a fixture book with `iter_with_setup` before timing the hot
//! operation.

use clob_core::{Pool, TradeCap};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

struct Base;
struct Quote;
struct Fee;

type BenchPool = Pool<Base, Quote, Fee>;

fn pool_with_resting_bids(levels: u64, orders_per_level: u64) -> (BenchPool, TradeCap) {
    let pool: BenchPool = Pool::new(1, 1, 1, 5_000_000, 2_500_000).unwrap();
    let maker = TradeCap::new();
    let owner = maker.owner_id();
    let quantity = 10u64;
    // Comfortably more than `sum(price) * quantity * orders_per_level` ever
    // needs for the level/order counts this benchmark exercises.
    pool.quote_custodian().deposit(owner, u64::MAX / 4);
    for level in 1..=levels {
        let price = level * 1_000;
        for _ in 0..orders_per_level {
            pool.inject_maker_order(&maker, price, quantity, true, u64::MAX, 0)
                .unwrap();
        }
    }
    (pool, maker)
}

fn bench_match_ask(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pool - match_ask");

    for &(levels, orders_per_level) in &[(10u64, 10u64), (100, 10), (100, 100)] {
        group.bench_with_input(
            BenchmarkId::new("drain_resting_bids", format!("{levels}x{orders_per_level}")),
            &(levels, orders_per_level),
            |b, &(levels, orders_per_level)| {
                b.iter_batched(
                    || {
                        let (pool, _maker) = pool_with_resting_bids(levels, orders_per_level);
                        let taker = TradeCap::new();
                        (pool, taker)
                    },
                    |(pool, taker)| {
                        let base_in = levels * orders_per_level * 10;
                        let outcome = black_box(pool.match_ask(taker.owner_id(), 0, 0, base_in));
                        outcome.unwrap();
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_place_limit_order_crossing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pool - place_limit_order (crossing)");

    for &orders_per_level in &[10u64, 100, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("ioc_sweep", orders_per_level),
            &orders_per_level,
            |b, &orders_per_level| {
                b.iter_batched(
                    || {
                        let (pool, _maker) = pool_with_resting_bids(1, orders_per_level);
                        let taker = TradeCap::new();
                        pool.base_custodian()
                            .deposit(taker.owner_id(), orders_per_level * 10);
                        (pool, taker)
                    },
                    |(pool, taker)| {
                        let result = black_box(pool.place_limit_order(
                            &taker,
                            1_000,
                            orders_per_level * 10,
                            false,
                            u64::MAX,
                            1,
                            0,
                        ));
                        result.unwrap();
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_match_ask, bench_place_limit_order_crossing);
criterion_main!(benches);
