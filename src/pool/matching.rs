//! Matching engine (C6, spec §4.6) — the three matching primitives.
//!
//! All three are "identical in skeleton, distinct in taker-side accounting"
//! (spec §4.6): walk the opposite side from its best price towards
//! `price_limit`, drain or partially drain each level's FIFO queue, sweep
//! any expired maker orders encountered along the way, and settle fees and
//! rebates through the custodian ledgers. The walk itself is structured as
//! a closure handed to [`super::BookSide::with_level_mut_or_insert`] per
//! level — the same "operate on one level, then ask the index for the
//! next one" shape as apex-engine's `WalkingResult`-driven loop in
//! `engine/matching.rs`/`engine/syncer.rs`, simplified here to plain
//! closures since this crate's single-threaded transactional model (spec
//! §5) has no concurrent walker state to synchronize.
//!
//! Two quantities computed per fill are allowed to legitimately round to
//! zero and so never go through `mul`/`mul_round`'s error-on-underflow
//! path: a degenerate sub-`SCALE` price can make `fill_quote` round to
//! zero (`unsafe_mul`, not `mul`), and a zero-rate pool makes every
//! commission round to zero (`mul_round_up(...).unwrap_or(0)`, not `?`).
//! Neither is a protocol error, and erroring mid-walk on either would
//! abort the whole call after earlier fills in the same walk have already
//! settled against the custodian, with no unwind — see `DESIGN.md`.

use super::Pool;
use crate::capability::OwnerId;
use crate::events::{Event, Fill};
use crate::fixed_point::{div_round_up, mul, mul_round_up, unsafe_mul};
use crate::types::{Price, Quantity};
use crate::error::Result;

/// The settled result of running one matching primitive to completion.
///
/// Field meaning depends on which primitive produced it — see each
/// function's doc comment — but in every case `base_filled`/`quote_filled`
/// are amounts already net of whatever commission that path deducts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOutcome {
    /// Net base quantity that changed hands in the taker's favor.
    pub base_filled: Quantity,
    /// Net quote quantity that changed hands in the taker's favor (for
    /// `match_ask`) or was spent (for the two bid-side primitives).
    pub quote_filled: Quantity,
    /// Gross base quantity removed from the opposite book by this walk,
    /// before any commission deduction. Equal to `base_filled` for
    /// `match_ask` (whose commission is quote-denominated); smaller than
    /// `base_filled`'s natural "amount bought" reading for the two
    /// bid-side primitives, whose commission is base-denominated. This is
    /// what `place_limit_order` subtracts from the order's original
    /// quantity to get the residual to re-inject as a maker order (spec
    /// §4.7.2 step 5) — a direct gross counter in place of the source's
    /// "derive it from the working quote balance's change" trick, since
    /// this crate already has the counter on hand.
    pub base_consumed: Quantity,
}

impl<Base, Quote, Fee> Pool<Base, Quote, Fee>
where
    Base: 'static,
    Quote: 'static,
{
    /// Taker sells `base_in` base. Walks the **bid** side from `max_leaf`
    /// downward, consuming levels with `price >= price_limit` (spec
    /// §4.6.1). Returns the net base consumed and net quote credited to
    /// the taker (post-commission).
    pub fn match_ask(
        &self,
        taker_owner: OwnerId,
        price_limit: Price,
        now: u64,
        base_in: Quantity,
    ) -> Result<MatchOutcome> {
        let mut base_remaining = base_in;
        let mut quote_out: u64 = 0;
        let mut fills: Vec<Fill> = Vec::new();

        loop {
            let Some(price) = self.bids.max_leaf() else {
                break;
            };
            if price < price_limit {
                break;
            }

            let stop: Result<bool> = self.bids.with_level_mut_or_insert(price, |level| {
                loop {
                    let Some(order_id) = level.front_id() else {
                        break;
                    };
                    let alive = level.borrow(order_id).unwrap().is_alive(now);
                    if !alive {
                        let maker = level.remove(order_id).unwrap();
                        let collateral = mul(maker.quantity, maker.price).unwrap_or(0);
                        if collateral > 0 {
                            let _ = self.quote_custodian.unlock(maker.owner, collateral);
                        }
                        self.forget_open_order(maker.owner, order_id);
                        self.push_event(Event::OrderCanceled {
                            pool_id: self.id,
                            order_id,
                            quantity_returned: collateral,
                            owner: maker.owner,
                        });
                        continue;
                    }

                    if base_remaining == 0 {
                        return Ok(true);
                    }

                    let maker_quantity = level.borrow(order_id).unwrap().quantity;
                    let maker_owner = level.borrow(order_id).unwrap().owner;
                    let fill_base = base_remaining.min(maker_quantity);
                    // A degenerate sub-`SCALE` price can legitimately round
                    // this to zero; that's a valid (if tiny) fill, not an
                    // underflow to propagate mid-walk after earlier fills
                    // in this same call have already settled (spec §5/§7:
                    // a failure here would abort without reverting them).
                    let (fill_quote, _) = unsafe_mul(fill_base, price);

                    let taker_commission =
                        mul_round_up(fill_quote, self.taker_fee_rate).unwrap_or(0);
                    let maker_rebate = mul(fill_quote, self.maker_rebate_rate).unwrap_or(0);
                    let protocol_fee = taker_commission.saturating_sub(maker_rebate);

                    self.quote_custodian.decrease_locked(maker_owner, fill_quote)?;
                    if maker_rebate > 0 {
                        self.quote_custodian
                            .increase_available(maker_owner, maker_rebate);
                    }
                    if protocol_fee > 0 {
                        self.credit_quote_trading_fee(protocol_fee);
                    }
                    quote_out += fill_quote.saturating_sub(taker_commission);
                    self.base_custodian.increase_available(maker_owner, fill_base);

                    fills.push(Fill {
                        maker_order_id: order_id,
                        maker_owner,
                        taker_order_id: 0,
                        taker_owner,
                        price,
                        base_quantity: fill_base,
                        quote_quantity: fill_quote,
                        taker_fee: taker_commission,
                        maker_rebate,
                    });

                    base_remaining -= fill_base;
                    let remaining_after = maker_quantity - fill_base;
                    if remaining_after == 0 {
                        level.remove(order_id);
                        self.forget_open_order(maker_owner, order_id);
                    } else {
                        level.borrow_mut(order_id).unwrap().quantity = remaining_after;
                    }

                    if base_remaining == 0 {
                        return Ok(true);
                    }
                }
                Ok(false)
            });

            if stop? {
                break;
            }
        }

        if !fills.is_empty() {
            self.push_event(Event::OrderFilled { pool_id: self.id, fills });
        }

        let base_filled = base_in - base_remaining;
        Ok(MatchOutcome {
            base_filled,
            quote_filled: quote_out,
            base_consumed: base_filled,
        })
    }

    /// Taker buys a fixed `base_qty`. Walks the **ask** side from
    /// `min_leaf` upward while `price <= price_limit` (spec §4.6.2).
    /// Commission and rebate are computed on `fill_base`, not `fill_quote`
    /// — preserve this asymmetry (spec §9).
    pub fn match_bid(
        &self,
        taker_owner: OwnerId,
        base_qty: Quantity,
        price_limit: Price,
        now: u64,
        quote_in: Quantity,
    ) -> Result<MatchOutcome> {
        let mut base_remaining = base_qty;
        let mut quote_remaining = quote_in;
        let mut base_out: u64 = 0;
        let mut fills: Vec<Fill> = Vec::new();

        loop {
            let Some(price) = self.asks.min_leaf() else {
                break;
            };
            if price > price_limit {
                break;
            }

            let stop: Result<bool> = self.asks.with_level_mut_or_insert(price, |level| {
                loop {
                    let Some(order_id) = level.front_id() else {
                        break;
                    };
                    let alive = level.borrow(order_id).unwrap().is_alive(now);
                    if !alive {
                        let maker = level.remove(order_id).unwrap();
                        let collateral = maker.quantity;
                        if collateral > 0 {
                            let _ = self.base_custodian.unlock(maker.owner, collateral);
                        }
                        self.forget_open_order(maker.owner, order_id);
                        self.push_event(Event::OrderCanceled {
                            pool_id: self.id,
                            order_id,
                            quantity_returned: collateral,
                            owner: maker.owner,
                        });
                        continue;
                    }

                    if base_remaining == 0 {
                        return Ok(true);
                    }

                    let maker_quantity = level.borrow(order_id).unwrap().quantity;
                    let maker_owner = level.borrow(order_id).unwrap().owner;
                    let fill_base = base_remaining.min(maker_quantity);
                    // See `match_ask`: a degenerate sub-`SCALE` price can
                    // legitimately round this to zero, which must not abort
                    // a walk that already settled earlier fills.
                    let (fill_quote, _) = unsafe_mul(fill_base, price);
                    if fill_quote > quote_remaining {
                        // Taker's supplied quote cannot cover this fill; stop
                        // here rather than over-spend (defensive — callers
                        // are expected to supply at least `mul(base_qty,
                        // price_limit)`).
                        return Ok(true);
                    }

                    let taker_commission =
                        mul_round_up(fill_base, self.taker_fee_rate).unwrap_or(0);
                    let maker_rebate = mul(fill_base, self.maker_rebate_rate).unwrap_or(0);
                    let protocol_fee = taker_commission.saturating_sub(maker_rebate);

                    self.base_custodian.decrease_locked(maker_owner, fill_base)?;
                    if maker_rebate > 0 {
                        self.base_custodian
                            .increase_available(maker_owner, maker_rebate);
                    }
                    if protocol_fee > 0 {
                        self.credit_base_trading_fee(protocol_fee);
                    }
                    base_out += fill_base.saturating_sub(taker_commission);
                    self.quote_custodian
                        .increase_available(maker_owner, fill_quote);

                    fills.push(Fill {
                        maker_order_id: order_id,
                        maker_owner,
                        taker_order_id: 0,
                        taker_owner,
                        price,
                        base_quantity: fill_base,
                        quote_quantity: fill_quote,
                        taker_fee: taker_commission,
                        maker_rebate,
                    });

                    base_remaining -= fill_base;
                    quote_remaining -= fill_quote;
                    let remaining_after = maker_quantity - fill_base;
                    if remaining_after == 0 {
                        level.remove(order_id);
                        self.forget_open_order(maker_owner, order_id);
                    } else {
                        level.borrow_mut(order_id).unwrap().quantity = remaining_after;
                    }

                    if base_remaining == 0 {
                        return Ok(true);
                    }
                }
                Ok(false)
            });

            if stop? {
                break;
            }
        }

        if !fills.is_empty() {
            self.push_event(Event::OrderFilled { pool_id: self.id, fills });
        }

        Ok(MatchOutcome {
            base_filled: base_out,
            quote_filled: quote_in - quote_remaining,
            base_consumed: base_qty - base_remaining,
        })
    }

    /// Taker buys with a fixed `quote_qty` spend (spec §4.6.3). Same walk
    /// as [`Pool::match_bid`], but each maker's consumable quote is
    /// computed from its remaining base quantity with a round-up
    /// (`mul_round_up`), and the base filled from that is derived with a
    /// round-up too (`div_round_up`) — both favor settlement precision
    /// over the taker, per spec.
    pub fn match_bid_with_quote_quantity(
        &self,
        taker_owner: OwnerId,
        quote_qty: Quantity,
        price_limit: Price,
        now: u64,
        quote_in: Quantity,
    ) -> Result<MatchOutcome> {
        let mut quote_remaining = quote_qty.min(quote_in);
        let mut base_out: u64 = 0;
        let mut quote_spent: u64 = 0;
        let mut base_consumed: u64 = 0;
        let mut fills: Vec<Fill> = Vec::new();

        loop {
            let Some(price) = self.asks.min_leaf() else {
                break;
            };
            if price > price_limit {
                break;
            }

            let stop: Result<bool> = self.asks.with_level_mut_or_insert(price, |level| {
                loop {
                    let Some(order_id) = level.front_id() else {
                        break;
                    };
                    let alive = level.borrow(order_id).unwrap().is_alive(now);
                    if !alive {
                        let maker = level.remove(order_id).unwrap();
                        let collateral = maker.quantity;
                        if collateral > 0 {
                            let _ = self.base_custodian.unlock(maker.owner, collateral);
                        }
                        self.forget_open_order(maker.owner, order_id);
                        self.push_event(Event::OrderCanceled {
                            pool_id: self.id,
                            order_id,
                            quantity_returned: collateral,
                            owner: maker.owner,
                        });
                        continue;
                    }

                    if quote_remaining == 0 {
                        return Ok(true);
                    }

                    let maker_quantity = level.borrow(order_id).unwrap().quantity;
                    let maker_owner = level.borrow(order_id).unwrap().owner;
                    let maker_quote_quantity = mul_round_up(maker_quantity, price)?;
                    let fill_quote = quote_remaining.min(maker_quote_quantity);
                    let fill_base = div_round_up(fill_quote, price)?.min(maker_quantity);

                    let taker_commission =
                        mul_round_up(fill_base, self.taker_fee_rate).unwrap_or(0);
                    let maker_rebate = mul(fill_base, self.maker_rebate_rate).unwrap_or(0);
                    let protocol_fee = taker_commission.saturating_sub(maker_rebate);

                    self.base_custodian.decrease_locked(maker_owner, fill_base)?;
                    if maker_rebate > 0 {
                        self.base_custodian
                            .increase_available(maker_owner, maker_rebate);
                    }
                    if protocol_fee > 0 {
                        self.credit_base_trading_fee(protocol_fee);
                    }
                    base_out += fill_base.saturating_sub(taker_commission);
                    self.quote_custodian
                        .increase_available(maker_owner, fill_quote);

                    fills.push(Fill {
                        maker_order_id: order_id,
                        maker_owner,
                        taker_order_id: 0,
                        taker_owner,
                        price,
                        base_quantity: fill_base,
                        quote_quantity: fill_quote,
                        taker_fee: taker_commission,
                        maker_rebate,
                    });

                    quote_spent += fill_quote;
                    quote_remaining -= fill_quote;
                    base_consumed += fill_base;
                    let remaining_after = maker_quantity - fill_base;
                    if remaining_after == 0 {
                        level.remove(order_id);
                        self.forget_open_order(maker_owner, order_id);
                    } else {
                        level.borrow_mut(order_id).unwrap().quantity = remaining_after;
                    }

                    if quote_remaining == 0 {
                        return Ok(true);
                    }
                }
                Ok(false)
            });

            if stop? {
                break;
            }
        }

        if !fills.is_empty() {
            self.push_event(Event::OrderFilled { pool_id: self.id, fills });
        }

        Ok(MatchOutcome {
            base_filled: base_out,
            quote_filled: quote_spent,
            base_consumed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::TradeCap;
    use crate::fixed_point::SCALE;
    use crate::types::TIMESTAMP_INF;

    struct Base;
    struct Quote;
    struct Fee;

    type TestPool = Pool<Base, Quote, Fee>;

    fn pool_with_fees(taker_fee: u64, maker_rebate: u64) -> TestPool {
        Pool::new(1, SCALE, 1, taker_fee, maker_rebate).unwrap()
    }

    fn place_bid(pool: &TestPool, cap: &TradeCap, price: u64, qty: u64) {
        let owner = cap.owner_id();
        let collateral = mul(qty, price).unwrap();
        pool.quote_custodian().deposit(owner, collateral);
        pool.quote_custodian().lock(cap, owner, collateral).unwrap();
        let id = pool.allocate_order_id(true);
        pool.bids.with_level_mut_or_insert(price, |level| {
            level.push_back(crate::types::Order {
                id,
                price,
                quantity: qty,
                is_bid: true,
                owner,
                expire_timestamp_ms: TIMESTAMP_INF,
            });
        });
        pool.record_open_order(owner, id, price);
    }

    #[test]
    fn s1_ioc_partial_fill_drains_matching_levels() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        place_bid(&pool, &alice, 5 * SCALE, 200);
        place_bid(&pool, &alice, 4 * SCALE, 200);
        place_bid(&pool, &alice, 4 * SCALE, 200);

        let bob = TradeCap::new();
        let outcome = pool
            .match_ask(bob.owner_id(), 4 * SCALE, 0, 800)
            .unwrap();

        assert_eq!(outcome.base_filled, 600);
        assert_eq!(outcome.quote_filled, 5 * 200 + 4 * 200 + 4 * 200);
        assert!(!pool.bids.find_leaf(4 * SCALE));
    }

    #[test]
    fn s4_expiry_skip_on_zero_size_market_bid() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        let owner = alice.owner_id();

        for (price, qty, alive) in [(9u64, 1u64, false), (9, 2, true), (11, 3, true)] {
            pool.base_custodian().deposit(owner, qty);
            pool.base_custodian().lock(&alice, owner, qty).unwrap();
            let id = pool.allocate_order_id(false);
            let expiry = if alive { TIMESTAMP_INF } else { 5 };
            pool.asks.with_level_mut_or_insert(price, |level| {
                level.push_back(crate::types::Order {
                    id,
                    price,
                    quantity: qty,
                    is_bid: false,
                    owner,
                    expire_timestamp_ms: expiry,
                });
            });
            pool.record_open_order(owner, id, price);
        }

        let bob = TradeCap::new();
        let outcome = pool
            .match_bid(bob.owner_id(), 0, crate::types::MAX_PRICE, 100, 0)
            .unwrap();

        assert_eq!(outcome.base_filled, 0);
        assert!(!pool.asks.find_leaf(9) || pool.asks.with_level(9, |l| l.length()) == Some(1));
        assert!(pool.asks.find_leaf(11));
    }
}
