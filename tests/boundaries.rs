//! Boundary behaviors (spec §8 B1–B4).

use clob_core::{OrderBookError, Pool, TradeCap, SCALE, TIMESTAMP_INF};

struct Base;
struct Quote;
struct Fee;

type TestPool = Pool<Base, Quote, Fee>;

fn pool_with_fees(taker_fee_rate: u64, maker_rebate_rate: u64) -> TestPool {
    Pool::new(1, SCALE, 1, taker_fee_rate, maker_rebate_rate).unwrap()
}

fn fund(pool: &TestPool, cap: &TradeCap, base: u64, quote: u64) {
    let owner = cap.owner_id();
    pool.base_custodian().deposit(owner, base);
    pool.quote_custodian().deposit(owner, quote);
}

/// (B1) A zero-quantity limit order is rejected outright.
#[test]
fn b1_zero_quantity_limit_order_rejected() {
    let pool = pool_with_fees(0, 0);
    let alice = TradeCap::new();
    fund(&pool, &alice, 0, 1_000);

    let err = pool
        .place_limit_order(&alice, 4 * SCALE, 0, true, TIMESTAMP_INF, 0, 0)
        .unwrap_err();
    assert!(matches!(err, OrderBookError::InvalidQuantity { quantity: 0 }));
}

/// (B2) An already-expired resting order is swept the first time a walk
/// reaches its level, rather than being silently skipped-in-place forever.
#[test]
fn b2_expired_order_swept_on_first_touch() {
    let pool = pool_with_fees(0, 0);
    let alice = TradeCap::new();
    fund(&pool, &alice, 100, 0);
    let id = pool
        .inject_maker_order(&alice, 4 * SCALE, 100, false, 5, 0)
        .unwrap();
    assert!(pool.get_order_status(&alice, id).is_ok());

    let bob = TradeCap::new();
    fund(&pool, &bob, 0, 400);
    let result = pool
        .place_limit_order(&bob, 4 * SCALE, 100, true, TIMESTAMP_INF, 1, 100)
        .unwrap();

    assert_eq!(result.base_filled, 0);
    assert!(pool.get_order_status(&alice, id).is_err());
    assert!(!pool.bids().find_leaf(4 * SCALE));
    // Swept, not matched: the order's base collateral is unlocked back to
    // the owner's available balance rather than changing hands.
    assert_eq!(pool.account_balance(&alice), (100, 0, 0, 0));
}

/// (B3) Matching into a completely empty book returns the inputs unchanged
/// — nothing fills, and the caller's balance round-trips.
#[test]
fn b3_matching_into_empty_book_is_unchanged() {
    let pool = pool_with_fees(0, 0);
    let bob = TradeCap::new();
    fund(&pool, &bob, 100, 0);
    let before = pool.account_balance(&bob);

    let result = pool
        .place_limit_order(&bob, 4 * SCALE, 100, false, TIMESTAMP_INF, 1, 0)
        .unwrap();

    assert_eq!(result.base_filled, 0);
    assert_eq!(result.quote_filled, 0);
    assert_eq!(pool.account_balance(&bob), before);
}

/// (B4) A `price_limit` beyond every resting price on the opposite book
/// matches nothing, leaving both the book and the caller's balance intact.
#[test]
fn b4_price_limit_beyond_every_leaf_is_unchanged() {
    let pool = pool_with_fees(0, 0);
    let alice = TradeCap::new();
    fund(&pool, &alice, 100, 0);
    pool.inject_maker_order(&alice, 4 * SCALE, 100, false, TIMESTAMP_INF, 0)
        .unwrap();

    let bob = TradeCap::new();
    fund(&pool, &bob, 0, 300);
    let before = pool.account_balance(&bob);

    let result = pool
        .place_limit_order(&bob, 3 * SCALE, 100, true, TIMESTAMP_INF, 1, 0)
        .unwrap();

    assert_eq!(result.base_filled, 0);
    assert_eq!(result.quote_filled, 0);
    assert_eq!(pool.account_balance(&bob), before);
    assert!(pool.bids().is_empty());
    assert!(pool.asks().find_leaf(4 * SCALE));
}
