//! Event log (spec §6 event schemas; supplemented per `SPEC_FULL.md` §10).
//!
//! Spec.md treats event *emission* as an external collaborator and only
//! specifies the schemas themselves as contracts. This crate adds a minimal
//! in-process collector so the mandatory fields are observable and testable
//! without inventing a message bus — grounded on the teacher's own
//! `TradeListener = Arc<dyn Fn(&TradeResult) + Send + Sync>` callback shape
//! (`orderbook/trade.rs`) and apex-engine's `OrderBookSyncer` trait
//! (`engine/syncer.rs`), generalized to a plain append-only `Vec` since this
//! crate's single-threaded transactional model (spec §5) has no concurrent
//! listeners to fan out to.

use crate::capability::OwnerId;
use crate::types::{OrderId, Price, Quantity, Side};
use serde::{Deserialize, Serialize};

/// One fill produced by a match (spec §6 `OrderFilled`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// The resting (maker) order's id.
    pub maker_order_id: OrderId,
    /// The maker's owner identity.
    pub maker_owner: OwnerId,
    /// The incoming (taker) order's id.
    pub taker_order_id: OrderId,
    /// The taker's owner identity.
    pub taker_owner: OwnerId,
    /// The price the fill executed at (the maker's resting price).
    pub price: Price,
    /// The base quantity exchanged.
    pub base_quantity: Quantity,
    /// The quote quantity exchanged.
    pub quote_quantity: Quantity,
    /// Taker commission charged on this fill, in the basis spec §4.6
    /// specifies for the path that produced it.
    pub taker_fee: Quantity,
    /// Maker rebate credited on this fill.
    pub maker_rebate: Quantity,
}

/// A domain event recorded by a pool. Field sets match the mandatory
/// schemas downstream observers are contracted against (spec §6); `side` is
/// carried alongside the mandated `is_bid` for readability at call sites
/// that already branch on [`Side`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A pool was created (spec §4: `Pool::create`).
    PoolCreated {
        /// The new pool's id.
        pool_id: u64,
        /// The base asset's type name.
        base_asset: String,
        /// The quote asset's type name.
        quote_asset: String,
        /// The scaled taker fee rate.
        taker_fee_rate: u64,
        /// The scaled maker rebate rate.
        maker_rebate_rate: u64,
        /// The minimum price increment.
        tick_size: u64,
        /// The minimum quantity increment.
        lot_size: u64,
        /// The fee charged to mint the pool.
        creation_fee: u64,
    },
    /// An order was accepted and, if unfilled, rested in the book.
    OrderPlaced {
        /// The pool the order rests on.
        pool_id: u64,
        /// The new order's id.
        order_id: OrderId,
        /// Which side it rests on.
        side: Side,
        /// `true` for a bid, mirroring `side` for callers matching the
        /// mandated schema field name literally.
        is_bid: bool,
        /// Its limit price.
        price: Price,
        /// Its quantity at placement time.
        base_asset_quantity_placed: Quantity,
        /// The order's owner.
        owner: OwnerId,
    },
    /// One or more fills were produced while matching an incoming order.
    OrderFilled {
        /// The pool the fills executed on.
        pool_id: u64,
        /// The fills produced, in match order. Carried as a vector rather
        /// than a single flattened record: one taker order can cross
        /// several maker orders at several distinct prices in one call,
        /// which a single `price` field cannot represent without losing
        /// information (see `DESIGN.md`).
        fills: Vec<Fill>,
    },
    /// A single resting order was canceled.
    OrderCanceled {
        /// The pool the order rested on.
        pool_id: u64,
        /// The canceled order's id.
        order_id: OrderId,
        /// Quantity returned to the owner's available balance.
        quantity_returned: Quantity,
        /// The order's owner.
        owner: OwnerId,
    },
    /// Every resting order for one owner was canceled at once.
    AllOrdersCanceled {
        /// The pool the orders rested on.
        pool_id: u64,
        /// The owner whose orders were canceled.
        owner: OwnerId,
        /// How many orders were canceled.
        count: usize,
    },
}

/// An append-only collector of [`Event`]s produced by a pool. Not a message
/// bus: the caller drains it (via [`EventLog::drain`]) and routes events
/// onward however their application needs.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Borrows every event recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Removes and returns every recorded event, oldest first, leaving the
    /// log empty.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_log() {
        let mut log = EventLog::new();
        log.push(Event::PoolCreated {
            pool_id: 1,
            base_asset: "Base".to_string(),
            quote_asset: "Quote".to_string(),
            taker_fee_rate: 0,
            maker_rebate_rate: 0,
            tick_size: 1,
            lot_size: 1,
            creation_fee: 100,
        });
        assert_eq!(log.events().len(), 1);
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.events().is_empty());
    }

    #[test]
    fn order_filled_round_trips_through_json() {
        let event = Event::OrderFilled {
            pool_id: 1,
            fills: vec![Fill {
                maker_order_id: 0,
                maker_owner: OwnerId([1u8; 32]),
                taker_order_id: crate::types::MIN_ASK_ORDER_ID,
                taker_owner: OwnerId([2u8; 32]),
                price: 5_000_000_000,
                base_quantity: 100,
                quote_quantity: 500,
                taker_fee: 3,
                maker_rebate: 1,
            }],
        };
        let json = serde_json::to_string(&event).unwrap();
        let decoded: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }
}
