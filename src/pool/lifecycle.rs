//! Order lifecycle (C7, spec §4.7): inject maker orders, place limit/market
//! orders under a time-in-force policy, and the three cancel flows.
//!
//! Grounded on the teacher's `operations.rs` (`add_limit_order`,
//! `submit_market_order`: validate, build the domain object, `trace!` at the
//! same granularity, delegate to the matching/insertion primitive) and
//! `mass_cancel.rs` (single-cancel-reused-by-batch, back-to-front iteration
//! for cancel-all, `tick_price` spatial-grouping cache for batch cancel).
//!
//! Transactionality (spec §5, §7: a failure must abort the *entire* call
//! with no partial settlement visible) is handled differently per
//! restriction rather than via a generic journal/undo log: `PostOrAbort`
//! and `FillOrKill` both validate against a non-mutating liquidity peek
//! (`Pool::gross_available_quantity`) *before* any custodian transfer or
//! book mutation happens, so neither can fail after partially committing.
//! `NoRestriction` and `ImmediateOrCancel` have no failure mode once
//! preconditions pass, so they run the mutating match directly. See
//! `DESIGN.md` for the resolved Open Question.

use super::Pool;
use crate::capability::TradeCap;
use crate::custodian::CustodianError;
use crate::error::{OrderBookError, Result};
use crate::events::Event;
use crate::fixed_point::mul;
use crate::types::{Order, OrderId, Price, Quantity, Restriction, Side};

/// Result of [`Pool::place_limit_order`] (spec §4.7.2 step 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimitOrderResult {
    /// Base quantity matched against the opposite book.
    pub base_filled: Quantity,
    /// Quote quantity that changed hands (spent for a bid, received for an
    /// ask), net of commission.
    pub quote_filled: Quantity,
    /// The id of the maker order injected for any unfilled residual, if one
    /// was rested.
    pub maker_order_id: Option<OrderId>,
}

/// Result of [`Pool::place_market_order`] (spec §4.7.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketOrderResult {
    /// Base quantity that changed hands.
    pub base_filled: Quantity,
    /// Quote quantity that changed hands, net of commission.
    pub quote_filled: Quantity,
}

/// Result of [`Pool::cancel_all`] (spec §4.7.5).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CancelAllResult {
    /// Every order id canceled, in the order they were processed
    /// (back-to-front through `user_open_orders`).
    pub canceled: Vec<OrderId>,
}

/// Result of [`Pool::batch_cancel`] (spec §4.7.6).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CancelBatchResult {
    /// Every order id canceled, in the caller's requested order.
    pub canceled: Vec<OrderId>,
}

impl<Base, Quote, Fee> Pool<Base, Quote, Fee>
where
    Base: 'static,
    Quote: 'static,
{
    /// Sums the non-expired quantity resting on the opposite side of `side`
    /// at prices at least as good as `price_limit` for the taker, stopping
    /// early once `target` is reached. A non-mutating read used by
    /// `PostOrAbort` (target `1`: "is there any crossing liquidity at all?")
    /// and `FillOrKill` (target: the order's own quantity) to decide,
    /// *before* touching any balance, whether the restriction's condition
    /// will hold (spec §4.7.2 step 6).
    fn gross_available_quantity(&self, is_bid: bool, price_limit: Price, now: u64, target: Quantity) -> Quantity {
        let mut sum: u64 = 0;
        if is_bid {
            for (price, level) in self.asks.iter_ascending() {
                if price > price_limit {
                    break;
                }
                sum = sum.saturating_add(level.iter().filter(|o| o.is_alive(now)).map(|o| o.quantity).sum());
                if sum >= target {
                    break;
                }
            }
        } else {
            for (price, level) in self.bids.iter_descending() {
                if price < price_limit {
                    break;
                }
                sum = sum.saturating_add(level.iter().filter(|o| o.is_alive(now)).map(|o| o.quantity).sum());
                if sum >= target {
                    break;
                }
            }
        }
        sum
    }

    /// Debits `amount` from the taker's available balance for the asset a
    /// limit/market order on `is_bid`'s side requires as its working input
    /// (quote for a bid, base for an ask), translating a plain custodian
    /// underflow into the spec's asset-specific error (spec §7
    /// `InsufficientQuoteCoin`/`InsufficientBaseCoin`).
    fn debit_working_balance(&self, cap: &TradeCap, is_bid: bool, amount: Quantity) -> Result<()> {
        let owner = cap.owner_id();
        let outcome = if is_bid {
            self.quote_custodian.withdraw(cap, owner, amount)
        } else {
            self.base_custodian.withdraw(cap, owner, amount)
        };
        outcome.map_err(|e| match e {
            CustodianError::InsufficientAvailable { available, required } if is_bid => {
                OrderBookError::InsufficientQuoteCoin { available, required }
            }
            CustodianError::InsufficientAvailable { available, required } => {
                OrderBookError::InsufficientBaseCoin { available, required }
            }
            other => other.into(),
        })
    }

    /// Injects a maker order directly into the book (spec §4.7.1): locks
    /// its collateral, allocates its id, inserts it at `price`, records it
    /// in `user_open_orders`, and emits `OrderPlaced`.
    pub fn inject_maker_order(
        &self,
        cap: &TradeCap,
        price: Price,
        quantity: Quantity,
        is_bid: bool,
        expire_timestamp_ms: u64,
        now: u64,
    ) -> Result<OrderId> {
        self.validate_price(price)?;
        self.validate_quantity(quantity)?;
        self.validate_expiry(expire_timestamp_ms, now)?;

        let owner = cap.owner_id();
        if is_bid {
            let collateral = mul(quantity, price)?;
            self.quote_custodian.lock(cap, owner, collateral)?;
        } else {
            self.base_custodian.lock(cap, owner, quantity)?;
        }

        let order_id = self.allocate_order_id(is_bid);
        let side = if is_bid { &self.bids } else { &self.asks };
        side.with_level_mut_or_insert(price, |level| {
            level.push_back(Order {
                id: order_id,
                price,
                quantity,
                is_bid,
                owner,
                expire_timestamp_ms,
            });
        });
        self.record_open_order(owner, order_id, price);

        tracing::debug!(order_id, price, quantity, is_bid, "order placed");
        self.push_event(Event::OrderPlaced {
            pool_id: self.id(),
            order_id,
            side: if is_bid { Side::Bid } else { Side::Ask },
            is_bid,
            price,
            base_asset_quantity_placed: quantity,
            owner,
        });
        Ok(order_id)
    }

    /// Places a limit order under a time-in-force restriction (spec
    /// §4.7.2). `restriction` is the wire byte (spec §6); an unrecognized
    /// value fails `InvalidRestriction` before anything else is validated.
    #[allow(clippy::too_many_arguments)]
    pub fn place_limit_order(
        &self,
        cap: &TradeCap,
        price: Price,
        quantity: Quantity,
        is_bid: bool,
        expire_timestamp_ms: u64,
        restriction: u8,
        now: u64,
    ) -> Result<LimitOrderResult> {
        self.validate_price(price)?;
        self.validate_quantity(quantity)?;
        self.validate_expiry(expire_timestamp_ms, now)?;
        let restriction = Restriction::from_u8(restriction)
            .ok_or(OrderBookError::InvalidRestriction(restriction))?;

        if restriction == Restriction::PostOrAbort {
            let crossing = self.gross_available_quantity(is_bid, price, now, 1);
            if crossing > 0 {
                return Err(OrderBookError::OrderCannotBeFullyPassive);
            }
            let maker_order_id =
                self.inject_maker_order(cap, price, quantity, is_bid, expire_timestamp_ms, now)?;
            return Ok(LimitOrderResult {
                base_filled: 0,
                quote_filled: 0,
                maker_order_id: Some(maker_order_id),
            });
        }

        if restriction == Restriction::FillOrKill {
            let available = self.gross_available_quantity(is_bid, price, now, quantity);
            if available < quantity {
                return Err(OrderBookError::OrderCannotBeFullyFilled);
            }
        }

        let owner = cap.owner_id();
        let required = if is_bid { mul(quantity, price)? } else { quantity };
        self.debit_working_balance(cap, is_bid, required)?;

        let outcome = if is_bid {
            self.match_bid(owner, quantity, price, now, required)?
        } else {
            self.match_ask(owner, price, now, required)?
        };

        if is_bid {
            let unspent = required - outcome.quote_filled;
            if unspent > 0 {
                self.quote_custodian.increase_available(owner, unspent);
            }
            if outcome.base_filled > 0 {
                self.base_custodian.increase_available(owner, outcome.base_filled);
            }
        } else {
            let unspent = required - outcome.base_filled;
            if unspent > 0 {
                self.base_custodian.increase_available(owner, unspent);
            }
            if outcome.quote_filled > 0 {
                self.quote_custodian.increase_available(owner, outcome.quote_filled);
            }
        }

        let residual_base = quantity.saturating_sub(outcome.base_consumed);

        let maker_order_id = match restriction {
            Restriction::NoRestriction if residual_base > 0 => Some(self.inject_maker_order(
                cap,
                price,
                residual_base,
                is_bid,
                expire_timestamp_ms,
                now,
            )?),
            Restriction::NoRestriction | Restriction::ImmediateOrCancel | Restriction::FillOrKill => {
                None
            }
            Restriction::PostOrAbort => unreachable!("handled above"),
        };

        Ok(LimitOrderResult {
            base_filled: outcome.base_filled,
            quote_filled: outcome.quote_filled,
            maker_order_id,
        })
    }

    /// Places a market order (spec §4.7.3). A market bid buys `quantity`
    /// base, spending up to the caller's full available quote; a market ask
    /// sells exactly `quantity` base, requiring that much available base up
    /// front. Custodian `available` balances stand in for the spec's
    /// external "coin wallet" collaborator (spec §6, §9 Design Notes).
    ///
    /// Unlike a limit order, `quantity == 0` is accepted: a zero-size
    /// market order fills nothing by construction but still walks (and so
    /// sweeps) the opposite book's first level, which is the documented way
    /// to trigger an expiry sweep on demand (spec §9: "exists explicitly to
    /// allow callers to trigger an expiry sweep; treat it as part of the
    /// contract, not a bug").
    pub fn place_market_order(
        &self,
        cap: &TradeCap,
        quantity: Quantity,
        is_bid: bool,
        now: u64,
    ) -> Result<MarketOrderResult> {
        if quantity % self.lot_size != 0 {
            return Err(OrderBookError::InvalidQuantity { quantity });
        }
        let owner = cap.owner_id();

        if is_bid {
            let wallet = self.quote_custodian.available(owner);
            self.debit_working_balance(cap, true, wallet)?;
            let outcome =
                self.match_bid(owner, quantity, crate::types::MAX_PRICE, now, wallet)?;
            let unspent = wallet - outcome.quote_filled;
            if unspent > 0 {
                self.quote_custodian.increase_available(owner, unspent);
            }
            if outcome.base_filled > 0 {
                self.base_custodian.increase_available(owner, outcome.base_filled);
            }
            Ok(MarketOrderResult {
                base_filled: outcome.base_filled,
                quote_filled: outcome.quote_filled,
            })
        } else {
            self.debit_working_balance(cap, false, quantity)?;
            let outcome = self.match_ask(owner, 0, now, quantity)?;
            let unspent = quantity - outcome.base_filled;
            if unspent > 0 {
                self.base_custodian.increase_available(owner, unspent);
            }
            if outcome.quote_filled > 0 {
                self.quote_custodian.increase_available(owner, outcome.quote_filled);
            }
            Ok(MarketOrderResult {
                base_filled: outcome.base_filled,
                quote_filled: outcome.quote_filled,
            })
        }
    }

    /// Cancels `order_id`, which must belong to `cap`'s owner (spec
    /// §4.7.4). Unlocks the order's collateral and removes it from both its
    /// price level and `user_open_orders`.
    pub fn cancel_order(&self, cap: &TradeCap, order_id: OrderId) -> Result<()> {
        let owner = cap.owner_id();
        self.cancel_order_for_owner(owner, order_id)?;
        Ok(())
    }

    /// Shared implementation behind `cancel_order`, `cancel_all`, and
    /// `batch_cancel`: all three ultimately cancel on behalf of a known
    /// owner, not a presented capability (cancel-all and batch-cancel only
    /// ever touch the caller's own index, so no separate authorization
    /// check is needed beyond having derived `owner` from a capability
    /// somewhere up the call chain).
    fn cancel_order_for_owner(&self, owner: crate::capability::OwnerId, order_id: OrderId) -> Result<Quantity> {
        let price = {
            let orders = self
                .user_open_orders
                .get(&owner)
                .ok_or(OrderBookError::InvalidUser)?;
            *orders
                .get(&order_id)
                .ok_or(OrderBookError::InvalidOrderId(order_id))?
        };

        let is_bid = crate::types::is_bid_id(order_id);
        let side = if is_bid { &self.bids } else { &self.asks };
        let removed = side.with_level_mut_or_insert(price, |level| level.remove(order_id));
        let order = removed.ok_or(OrderBookError::InvalidOrderId(order_id))?;
        if order.owner != owner {
            // Defensive: user_open_orders and the level disagreed. Should
            // never happen (spec §3 invariant), but surfaces as a named
            // error rather than a silent inconsistency.
            return Err(OrderBookError::UnauthorizedCancel { order_id });
        }

        self.forget_open_order(owner, order_id);

        let quantity_returned = if is_bid {
            let collateral = mul(order.quantity, order.price).unwrap_or(0);
            if collateral > 0 {
                self.quote_custodian.unlock(owner, collateral)?;
            }
            collateral
        } else {
            if order.quantity > 0 {
                self.base_custodian.unlock(owner, order.quantity)?;
            }
            order.quantity
        };

        tracing::debug!(order_id, owner = %owner, "order canceled");
        self.push_event(Event::OrderCanceled {
            pool_id: self.id(),
            order_id,
            quantity_returned,
            owner,
        });
        Ok(quantity_returned)
    }

    /// Cancels every resting order owned by `cap`'s owner (spec §4.7.5),
    /// back-to-front through `user_open_orders`'s insertion order.
    pub fn cancel_all(&self, cap: &TradeCap) -> Result<CancelAllResult> {
        let owner = cap.owner_id();
        let ids: Vec<OrderId> = self
            .user_open_orders
            .get(&owner)
            .map(|orders| orders.keys().rev().copied().collect())
            .unwrap_or_default();

        let mut canceled = Vec::with_capacity(ids.len());
        for order_id in ids {
            self.cancel_order_for_owner(owner, order_id)?;
            canceled.push(order_id);
        }

        tracing::debug!(owner = %owner, count = canceled.len(), "all orders canceled");
        self.push_event(Event::AllOrdersCanceled {
            pool_id: self.id(),
            owner,
            count: canceled.len(),
        });
        Ok(CancelAllResult { canceled })
    }

    /// Cancels a caller-supplied batch of order ids, all of which must
    /// belong to `cap`'s owner (spec §4.7.6). Caches the price recorded for
    /// the previous id and reuses its level lookup when consecutive ids
    /// share a price — a savings when callers group ids by price level.
    /// The cache starts at the impossible price `0` so the first id always
    /// forces a fresh lookup (spec §9).
    pub fn batch_cancel(&self, cap: &TradeCap, order_ids: &[OrderId]) -> Result<CancelBatchResult> {
        let owner = cap.owner_id();
        let mut cached_price: Price = 0;
        let mut cached_exists = false;
        let mut canceled = Vec::with_capacity(order_ids.len());

        for &order_id in order_ids {
            let price = {
                let orders = self
                    .user_open_orders
                    .get(&owner)
                    .ok_or(OrderBookError::InvalidUser)?;
                *orders
                    .get(&order_id)
                    .ok_or(OrderBookError::InvalidOrderId(order_id))?
            };

            if price != cached_price {
                let is_bid = crate::types::is_bid_id(order_id);
                let side = if is_bid { &self.bids } else { &self.asks };
                cached_exists = side.find_leaf(price);
                cached_price = price;
            }
            if !cached_exists {
                return Err(OrderBookError::InvalidTickPrice { order_id });
            }

            self.cancel_order_for_owner(owner, order_id)?;
            canceled.push(order_id);
        }

        tracing::debug!(owner = %owner, count = canceled.len(), "batch cancel");
        self.push_event(Event::AllOrdersCanceled {
            pool_id: self.id(),
            owner,
            count: canceled.len(),
        });
        Ok(CancelBatchResult { canceled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_point::SCALE;
    use crate::types::TIMESTAMP_INF;

    struct Base;
    struct Quote;
    struct Fee;

    type TestPool = Pool<Base, Quote, Fee>;

    fn pool_with_fees(taker_fee: u64, maker_rebate: u64) -> TestPool {
        Pool::new(1, SCALE, 1, taker_fee, maker_rebate).unwrap()
    }

    fn fund(pool: &TestPool, cap: &TradeCap, base: u64, quote: u64) {
        let owner = cap.owner_id();
        pool.base_custodian().deposit(owner, base);
        pool.quote_custodian().deposit(owner, quote);
    }

    #[test]
    fn inject_maker_bid_locks_quote_collateral() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        fund(&pool, &alice, 0, 1_000);
        let id = pool
            .inject_maker_order(&alice, 5 * SCALE, 100, true, TIMESTAMP_INF, 0)
            .unwrap();
        assert_eq!(id, crate::types::MIN_BID_ORDER_ID);
        assert_eq!(pool.quote_custodian().balance(alice.owner_id()), (500, 500));
    }

    #[test]
    fn place_limit_order_rejects_zero_quantity() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        let err = pool
            .place_limit_order(&alice, SCALE, 0, true, TIMESTAMP_INF, 0, 0)
            .unwrap_err();
        assert!(matches!(err, OrderBookError::InvalidQuantity { .. }));
    }

    #[test]
    fn place_limit_order_invalid_restriction_fails_before_state_change() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        fund(&pool, &alice, 0, 1_000);
        let err = pool
            .place_limit_order(&alice, SCALE, 10, true, TIMESTAMP_INF, 9, 0)
            .unwrap_err();
        assert!(matches!(err, OrderBookError::InvalidRestriction(9)));
        assert_eq!(pool.quote_custodian().balance(alice.owner_id()), (1_000, 0));
    }

    #[test]
    fn s2_fill_or_kill_reject_reverts_nothing() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        fund(&pool, &alice, 0, 5 * 200 + 4 * 200 + 4 * 200);
        pool.place_limit_order(&alice, 5 * SCALE, 200, true, TIMESTAMP_INF, 0, 0)
            .unwrap();
        pool.place_limit_order(&alice, 4 * SCALE, 200, true, TIMESTAMP_INF, 0, 0)
            .unwrap();
        pool.place_limit_order(&alice, 4 * SCALE, 200, true, TIMESTAMP_INF, 0, 0)
            .unwrap();

        let bob = TradeCap::new();
        fund(&pool, &bob, 1_000, 0);
        let err = pool
            .place_limit_order(&bob, 4 * SCALE, 601, false, TIMESTAMP_INF, 2, 0)
            .unwrap_err();
        assert!(matches!(err, OrderBookError::OrderCannotBeFullyFilled));
        assert_eq!(pool.base_custodian().balance(bob.owner_id()), (1_000, 0));
    }

    #[test]
    fn s3_post_only_reject_on_cross() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        fund(&pool, &alice, 0, 5 * 200 + 4 * 200 + 4 * 200);
        pool.place_limit_order(&alice, 5 * SCALE, 200, true, TIMESTAMP_INF, 0, 0)
            .unwrap();
        pool.place_limit_order(&alice, 4 * SCALE, 200, true, TIMESTAMP_INF, 0, 0)
            .unwrap();
        pool.place_limit_order(&alice, 4 * SCALE, 200, true, TIMESTAMP_INF, 0, 0)
            .unwrap();

        let bob = TradeCap::new();
        fund(&pool, &bob, 1_000, 0);
        let err = pool
            .place_limit_order(&bob, 4 * SCALE, 601, false, TIMESTAMP_INF, 3, 0)
            .unwrap_err();
        assert!(matches!(err, OrderBookError::OrderCannotBeFullyPassive));
        assert_eq!(pool.base_custodian().balance(bob.owner_id()), (1_000, 0));
    }

    #[test]
    fn s1_ioc_partial_fill() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        fund(&pool, &alice, 0, 5 * 200 + 4 * 200 + 4 * 200);
        pool.place_limit_order(&alice, 5 * SCALE, 200, true, TIMESTAMP_INF, 0, 0)
            .unwrap();
        pool.place_limit_order(&alice, 4 * SCALE, 200, true, TIMESTAMP_INF, 0, 0)
            .unwrap();
        pool.place_limit_order(&alice, 4 * SCALE, 200, true, TIMESTAMP_INF, 0, 0)
            .unwrap();

        let bob = TradeCap::new();
        fund(&pool, &bob, 800, 0);
        let result = pool
            .place_limit_order(&bob, 4 * SCALE, 800, false, TIMESTAMP_INF, 1, 0)
            .unwrap();
        assert_eq!(result.base_filled, 600);
        assert_eq!(result.quote_filled, 5 * 200 + 4 * 200 + 4 * 200);
        assert!(result.maker_order_id.is_none());
        assert_eq!(pool.base_custodian().balance(bob.owner_id()), (200, 0));
        assert!(!pool.bids().find_leaf(4 * SCALE));
    }

    #[test]
    fn cancel_order_unlocks_collateral() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        fund(&pool, &alice, 0, 1_000);
        let id = pool
            .inject_maker_order(&alice, 5 * SCALE, 100, true, TIMESTAMP_INF, 0)
            .unwrap();
        pool.cancel_order(&alice, id).unwrap();
        assert_eq!(pool.quote_custodian().balance(alice.owner_id()), (1_000, 0));
    }

    #[test]
    fn cancel_order_wrong_id_fails() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        fund(&pool, &alice, 0, 1_000);
        pool.inject_maker_order(&alice, 5 * SCALE, 100, true, TIMESTAMP_INF, 0)
            .unwrap();
        let err = pool.cancel_order(&alice, 999).unwrap_err();
        assert!(matches!(err, OrderBookError::InvalidOrderId(999)));
    }

    #[test]
    fn cancel_all_clears_every_open_order() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        fund(&pool, &alice, 0, 3_000);
        pool.inject_maker_order(&alice, 5 * SCALE, 100, true, TIMESTAMP_INF, 0)
            .unwrap();
        pool.inject_maker_order(&alice, 4 * SCALE, 100, true, TIMESTAMP_INF, 0)
            .unwrap();

        let result = pool.cancel_all(&alice).unwrap();
        assert_eq!(result.canceled.len(), 2);
        assert_eq!(pool.quote_custodian().balance(alice.owner_id()), (3_000, 0));
        assert!(pool.bids().is_empty());
    }

    #[test]
    fn batch_cancel_requires_owned_orders() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        let bob = TradeCap::new();
        fund(&pool, &alice, 0, 1_000);
        let id = pool
            .inject_maker_order(&alice, 5 * SCALE, 100, true, TIMESTAMP_INF, 0)
            .unwrap();
        let err = pool.batch_cancel(&bob, &[id]).unwrap_err();
        assert!(matches!(err, OrderBookError::InvalidUser));
    }

    #[test]
    fn market_order_buys_available_liquidity() {
        let pool = pool_with_fees(0, 0);
        let alice = TradeCap::new();
        fund(&pool, &alice, 100, 0);
        pool.inject_maker_order(&alice, 2 * SCALE, 100, false, TIMESTAMP_INF, 0)
            .unwrap();

        let bob = TradeCap::new();
        fund(&pool, &bob, 0, 500);
        let result = pool.place_market_order(&bob, 100, true, 0).unwrap();
        assert_eq!(result.base_filled, 100);
        assert_eq!(result.quote_filled, 200);
        assert_eq!(pool.quote_custodian().balance(bob.owner_id()), (300, 0));
    }
}
