//! Read-only query surface (C8, spec §4.8).
//!
//! Every query here returns an owned snapshot rather than a borrow into the
//! pool (spec §9 Design Notes: "no live references out of the pool survive
//! past the call that produced them") — the same "return a clone, not a
//! reference" discipline the teacher's `orderbook/iterators.rs` uses for its
//! `LevelInfo` depth snapshots, needed here doubly since `BookSide` itself
//! only ever hands back level *clones* (see `book_side.rs`).

use super::Pool;
use crate::capability::TradeCap;
use crate::error::{OrderBookError, Result};
use super::book_side::Extreme;
use crate::types::{Order, OrderId, Price, Quantity, Side};
use serde::{Deserialize, Serialize};

/// A price/depth snapshot over a contiguous price range on one side (spec
/// §4.8 `level2_book_status`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Level2BookStatus {
    /// Resting prices within range, in the side's natural best-to-worst
    /// order, with any zero-depth level omitted.
    pub prices: Vec<Price>,
    /// The non-expired quantity resting at each corresponding price in
    /// `prices`.
    pub depths: Vec<Quantity>,
}

impl<Base, Quote, Fee> Pool<Base, Quote, Fee>
where
    Base: 'static,
    Quote: 'static,
{
    /// Returns `(base_available, base_locked, quote_available, quote_locked)`
    /// for `cap`'s owner (spec §4.8).
    #[must_use]
    pub fn account_balance(&self, cap: &TradeCap) -> (Quantity, Quantity, Quantity, Quantity) {
        let owner = cap.owner_id();
        let (base_available, base_locked) = self.base_custodian.balance(owner);
        let (quote_available, quote_locked) = self.quote_custodian.balance(owner);
        (base_available, base_locked, quote_available, quote_locked)
    }

    /// Every order resting for `cap`'s owner, in the order they were opened
    /// (spec §4.8: "iterate `user_open_orders[owner]` in insertion order").
    pub fn list_open_orders(&self, cap: &TradeCap) -> Vec<Order> {
        let owner = cap.owner_id();
        let Some(orders) = self.user_open_orders.get(&owner) else {
            return Vec::new();
        };
        orders
            .iter()
            .filter_map(|(&order_id, &price)| {
                let is_bid = crate::types::is_bid_id(order_id);
                let side = if is_bid { &self.bids } else { &self.asks };
                side.with_level(price, |level| level.borrow(order_id).cloned())
                    .flatten()
            })
            .collect()
    }

    /// Looks up one resting order by id, provided `cap`'s owner placed it
    /// (spec §4.8: "look up by owner + recorded price; fail if absent").
    pub fn get_order_status(&self, cap: &TradeCap, order_id: OrderId) -> Result<Order> {
        let owner = cap.owner_id();
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
        side.with_level(price, |level| level.borrow(order_id).cloned())
            .flatten()
            .ok_or(OrderBookError::InvalidOrderId(order_id))
    }

    /// `(best_bid, best_ask)`; either may be absent if that side is empty
    /// (spec §4.8).
    #[must_use]
    pub fn get_market_price(&self) -> (Option<Price>, Option<Price>) {
        (self.bids.max_leaf(), self.asks.min_leaf())
    }

    /// Aggregates non-expired depth per price level on `side` within
    /// `[price_low, price_high]` (spec §4.8). The requested range is first
    /// clamped to the side's own `[min_leaf, max_leaf]`, then each clamped
    /// bound is snapped inward to the nearest resting price; levels whose
    /// summed depth turns out to be zero (every order at that price has
    /// expired) are dropped from the result.
    #[must_use]
    pub fn level2_book_status(
        &self,
        side: Side,
        price_low: Price,
        price_high: Price,
        now: u64,
    ) -> Level2BookStatus {
        let book = match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        };

        let (Some(side_min), Some(side_max)) = (book.min_leaf(), book.max_leaf()) else {
            return Level2BookStatus::default();
        };
        let low = price_low.max(side_min);
        let high = price_high.min(side_max);
        if low > high {
            return Level2BookStatus::default();
        }

        let Some(snapped_low) = book.find_closest_key(low, Extreme::Min) else {
            return Level2BookStatus::default();
        };
        let Some(snapped_high) = book.find_closest_key(high, Extreme::Max) else {
            return Level2BookStatus::default();
        };
        if snapped_low > snapped_high {
            return Level2BookStatus::default();
        }

        let mut prices = Vec::new();
        let mut depths = Vec::new();
        let in_range = |price: Price| price >= snapped_low && price <= snapped_high;

        let levels: Box<dyn Iterator<Item = (Price, crate::level::Level)>> = match side {
            Side::Bid => Box::new(book.iter_descending()),
            Side::Ask => Box::new(book.iter_ascending()),
        };
        for (price, level) in levels {
            if !in_range(price) {
                continue;
            }
            let depth: Quantity = level
                .iter()
                .filter(|order| order.is_alive(now))
                .map(|order| order.quantity)
                .sum();
            if depth > 0 {
                prices.push(price);
                depths.push(depth);
            }
        }

        Level2BookStatus { prices, depths }
    }
}
