//! Core order/side/restriction types shared across the pool.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A price, scaled by [`crate::fixed_point::SCALE`]: quote units per one
/// base unit, times the scale.
pub type Price = u64;

/// An un-scaled base or quote quantity.
pub type Quantity = u64;

/// Order identifier. The top bit encodes the side: `0` for bids, `1` for
/// asks (spec §3). Within a side, ids are assigned monotonically, which
/// doubles as the side's time-priority order.
pub type OrderId = u64;

/// First id ever assigned to a bid.
pub const MIN_BID_ORDER_ID: OrderId = 0;

/// First id ever assigned to an ask: `2^63`.
pub const MIN_ASK_ORDER_ID: OrderId = 1 << 63;

/// Largest representable price: `2^64 - 1`.
pub const MAX_PRICE: Price = u64::MAX;

/// Sentinel "never expires" timestamp: `2^64 - 1`.
pub const TIMESTAMP_INF: u64 = u64::MAX;

/// Returns `true` if `order_id`'s top bit marks it as a bid.
#[must_use]
#[inline]
pub fn is_bid_id(order_id: OrderId) -> bool {
    order_id < MIN_ASK_ORDER_ID
}

/// Which side of the book an order or a match request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// A bid: the order wants to buy base with quote.
    Bid,
    /// An ask: the order wants to sell base for quote.
    Ask,
}

impl Side {
    /// The opposite side: bids match against asks and vice versa.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// Time-in-force / execution restriction for a limit order (spec §6).
///
/// Unlike the wider corpus's three-enum split (`TimeInForce` /
/// `MatchStrategy` / `LiquidityDirective`), the source protocol models this
/// as a single four-variant restriction enum, so that's what this crate
/// keeps — see `SPEC_FULL.md` §8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Restriction {
    /// Unfilled residual rests in the book as a maker order.
    NoRestriction = 0,
    /// Fill what's immediately available; cancel any residual.
    ImmediateOrCancel = 1,
    /// Fill the entire order immediately or abort the whole call.
    FillOrKill = 2,
    /// Abort if the order would take any liquidity; otherwise rest in full.
    PostOrAbort = 3,
}

impl Restriction {
    /// Decodes the wire representation used by spec §6, or `None` for any
    /// other value (callers should raise `InvalidRestriction`).
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Restriction::NoRestriction),
            1 => Some(Restriction::ImmediateOrCancel),
            2 => Some(Restriction::FillOrKill),
            3 => Some(Restriction::PostOrAbort),
            _ => None,
        }
    }
}

/// A resting or incoming order.
///
/// `quantity` is always the *remaining* quantity; it is decremented in
/// place by matches and the order is removed from its level the instant it
/// reaches zero (spec §3 invariant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique id; msb encodes side (see [`is_bid_id`]).
    pub id: OrderId,
    /// Limit price, a multiple of the pool's `tick_size`.
    pub price: Price,
    /// Remaining quantity, a multiple of the pool's `lot_size`.
    pub quantity: Quantity,
    /// `true` for a bid, `false` for an ask. Redundant with `id`'s msb but
    /// kept explicit for readability at call sites, as the teacher keeps
    /// `side` alongside its own `BookKey`-derived ordering.
    pub is_bid: bool,
    /// Opaque owner handle (a capability's stable identity).
    pub owner: crate::capability::OwnerId,
    /// Inclusive upper bound in epoch milliseconds: the order is alive iff
    /// `expire_timestamp_ms > now`.
    pub expire_timestamp_ms: u64,
}

impl Order {
    /// `true` if this order is alive at time `now` (spec §3: "expiry iff
    /// `expiry > now`").
    #[must_use]
    #[inline]
    pub fn is_alive(&self, now: u64) -> bool {
        self.expire_timestamp_ms > now
    }

    /// Quote notional locked for a bid at this order's price and quantity:
    /// `mul(quantity, price)`, rounding down (used to reconstruct the
    /// collateral owed on cancel/expiry-unlock, spec §4.7.4/§4.6).
    pub fn bid_collateral(&self) -> Result<Quantity, crate::fixed_point::FixedPointError> {
        crate::fixed_point::mul(self.quantity, self.price)
    }
}
