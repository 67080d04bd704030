//! The pool: a single base/quote trading pair (spec §3 "Pool", §0 crate shape).
//!
//! Asset identity is carried as a phantom type parameter exactly as the
//! Design Notes prescribe (§9: "model as generic parameters on the pool and
//! custodian"): `Pool<Base, Quote, Fee>` is generic over zero-sized marker
//! types for the base asset, the quote asset, and the asset the creation fee
//! is denominated in. Call sites that don't care pick `()` for all three,
//! matching the teacher's own `OrderBook<T>` generic-payload convention
//! (there `T` is an application payload; here it is asset identity — same
//! shape, different purpose).

mod book_side;
mod lifecycle;
mod matching;
mod query;

pub use book_side::{BookSide, Extreme};
pub use lifecycle::{CancelAllResult, CancelBatchResult, LimitOrderResult, MarketOrderResult};
pub use matching::MatchOutcome;
pub use query::Level2BookStatus;

use crate::capability::OwnerId;
use crate::custodian::Custodian;
use crate::error::{OrderBookError, Result};
use crate::events::{Event, EventLog};
use crate::types::{OrderId, Price, MIN_ASK_ORDER_ID, MIN_BID_ORDER_ID};
use indexmap::IndexMap;
use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use dashmap::DashMap;

/// Fixed-point scale: `S = 10^9` (spec §6).
pub const SCALE: u64 = crate::fixed_point::SCALE;

/// Reference taker fee rate: `5_000_000` (0.5%), scaled by [`SCALE`].
pub const REFERENCE_TAKER_FEE_RATE: u64 = 5_000_000;

/// Reference maker rebate rate: `2_500_000` (0.25%), scaled by [`SCALE`].
pub const REFERENCE_MAKER_REBATE_RATE: u64 = 2_500_000;

/// The fixed fee charged to mint a pool: `100 * 10^9` of the fee asset
/// (spec §6).
pub const CREATION_FEE: u64 = 100 * SCALE;

/// A single base/quote trading pair: price-time-priority books on both
/// sides, an order id allocator per side, a per-user open-order index, and
/// a custodial ledger for both assets.
///
/// `Base`, `Quote`, and `Fee` are zero-sized marker types carrying asset
/// identity at the type level; they never appear in a value position.
pub struct Pool<Base, Quote, Fee> {
    id: u64,
    bids: BookSide,
    asks: BookSide,
    next_bid_order_id: AtomicU64,
    next_ask_order_id: AtomicU64,
    user_open_orders: DashMap<OwnerId, IndexMap<OrderId, Price>>,
    taker_fee_rate: u64,
    maker_rebate_rate: u64,
    tick_size: u64,
    lot_size: u64,
    base_custodian: Custodian<Base>,
    quote_custodian: Custodian<Quote>,
    creation_fee: u64,
    base_asset_trading_fees: AtomicU64,
    quote_asset_trading_fees: AtomicU64,
    events: Mutex<EventLog>,
    _assets: PhantomData<(Base, Quote, Fee)>,
}

impl<Base, Quote, Fee> Pool<Base, Quote, Fee>
where
    Base: 'static,
    Quote: 'static,
{
    /// Builds a pool directly, without charging a creation fee. Useful for
    /// tests and for embedding contexts that mint the fee externally.
    pub fn new(
        id: u64,
        tick_size: u64,
        lot_size: u64,
        taker_fee_rate: u64,
        maker_rebate_rate: u64,
    ) -> Result<Self> {
        if TypeId::of::<Base>() == TypeId::of::<Quote>() {
            return Err(OrderBookError::InvalidPair);
        }
        if taker_fee_rate < maker_rebate_rate {
            return Err(OrderBookError::InvalidFeeRateRebateRate {
                taker_fee_rate,
                maker_rebate_rate,
            });
        }
        if tick_size == 0 {
            return Err(OrderBookError::InvalidPrice { price: 0 });
        }
        if lot_size == 0 {
            return Err(OrderBookError::InvalidQuantity { quantity: 0 });
        }
        Ok(Self {
            id,
            bids: BookSide::new(),
            asks: BookSide::new(),
            next_bid_order_id: AtomicU64::new(MIN_BID_ORDER_ID),
            next_ask_order_id: AtomicU64::new(MIN_ASK_ORDER_ID),
            user_open_orders: DashMap::new(),
            taker_fee_rate,
            maker_rebate_rate,
            tick_size,
            lot_size,
            base_custodian: Custodian::new(),
            quote_custodian: Custodian::new(),
            creation_fee: 0,
            base_asset_trading_fees: AtomicU64::new(0),
            quote_asset_trading_fees: AtomicU64::new(0),
            events: Mutex::new(EventLog::new()),
            _assets: PhantomData,
        })
    }

    /// Mints a new pool, charging exactly [`CREATION_FEE`] of the fee asset
    /// (spec §6, §4). The creation fee is recorded but never spent (spec
    /// §3); this crate models the fee-asset "coin" collaborator (spec §6)
    /// as a raw `u64` amount the caller has already collected.
    pub fn create(
        id: u64,
        tick_size: u64,
        lot_size: u64,
        taker_fee_rate: u64,
        maker_rebate_rate: u64,
        creation_fee_paid: u64,
    ) -> Result<Self> {
        if creation_fee_paid != CREATION_FEE {
            return Err(OrderBookError::InvalidFee {
                expected: CREATION_FEE,
                actual: creation_fee_paid,
            });
        }
        let mut pool = Self::new(id, tick_size, lot_size, taker_fee_rate, maker_rebate_rate)?;
        pool.creation_fee = creation_fee_paid;
        tracing::debug!(pool_id = id, fee = creation_fee_paid, "pool created");
        pool.push_event(Event::PoolCreated {
            pool_id: id,
            base_asset: std::any::type_name::<Base>().to_string(),
            quote_asset: std::any::type_name::<Quote>().to_string(),
            taker_fee_rate,
            maker_rebate_rate,
            tick_size,
            lot_size,
            creation_fee: creation_fee_paid,
        });
        Ok(pool)
    }

    /// This pool's id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The minimum price increment.
    #[must_use]
    pub fn tick_size(&self) -> u64 {
        self.tick_size
    }

    /// The minimum quantity increment.
    #[must_use]
    pub fn lot_size(&self) -> u64 {
        self.lot_size
    }

    /// The scaled taker fee rate.
    #[must_use]
    pub fn taker_fee_rate(&self) -> u64 {
        self.taker_fee_rate
    }

    /// The scaled maker rebate rate.
    #[must_use]
    pub fn maker_rebate_rate(&self) -> u64 {
        self.maker_rebate_rate
    }

    /// The fixed fee paid to create this pool (never spent).
    #[must_use]
    pub fn creation_fee(&self) -> u64 {
        self.creation_fee
    }

    /// Accumulated protocol fees denominated in base.
    #[must_use]
    pub fn base_asset_trading_fees(&self) -> u64 {
        self.base_asset_trading_fees.load(Ordering::SeqCst)
    }

    /// Accumulated protocol fees denominated in quote.
    #[must_use]
    pub fn quote_asset_trading_fees(&self) -> u64 {
        self.quote_asset_trading_fees.load(Ordering::SeqCst)
    }

    /// Read-only access to the bid side, for diagnostics and tests.
    #[must_use]
    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    /// Read-only access to the ask side, for diagnostics and tests.
    #[must_use]
    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    /// Read-only access to the base custodian.
    #[must_use]
    pub fn base_custodian(&self) -> &Custodian<Base> {
        &self.base_custodian
    }

    /// Read-only access to the quote custodian.
    #[must_use]
    pub fn quote_custodian(&self) -> &Custodian<Quote> {
        &self.quote_custodian
    }

    /// Removes and returns every event recorded so far, oldest first.
    pub fn drain_events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .drain()
    }

    pub(crate) fn push_event(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }

    pub(crate) fn validate_price(&self, price: Price) -> Result<()> {
        if price == 0 || price % self.tick_size != 0 {
            return Err(OrderBookError::InvalidPrice { price });
        }
        Ok(())
    }

    pub(crate) fn validate_quantity(&self, quantity: u64) -> Result<()> {
        if quantity == 0 || quantity % self.lot_size != 0 {
            return Err(OrderBookError::InvalidQuantity { quantity });
        }
        Ok(())
    }

    pub(crate) fn validate_expiry(&self, expire_timestamp_ms: u64, now: u64) -> Result<()> {
        if expire_timestamp_ms <= now {
            return Err(OrderBookError::InvalidExpireTimestamp {
                expire_timestamp_ms,
                now,
            });
        }
        Ok(())
    }

    /// Allocates the next order id for `side`, never reusing one (spec §3,
    /// P2: "`next_*_order_id` never decrease").
    pub(crate) fn allocate_order_id(&self, is_bid: bool) -> OrderId {
        if is_bid {
            self.next_bid_order_id.fetch_add(1, Ordering::SeqCst)
        } else {
            self.next_ask_order_id.fetch_add(1, Ordering::SeqCst)
        }
    }

    pub(crate) fn credit_quote_trading_fee(&self, amount: u64) {
        self.quote_asset_trading_fees
            .fetch_add(amount, Ordering::SeqCst);
    }

    pub(crate) fn credit_base_trading_fee(&self, amount: u64) {
        self.base_asset_trading_fees
            .fetch_add(amount, Ordering::SeqCst);
    }

    pub(crate) fn record_open_order(&self, owner: OwnerId, order_id: OrderId, price: Price) {
        self.user_open_orders
            .entry(owner)
            .or_default()
            .insert(order_id, price);
    }

    pub(crate) fn forget_open_order(&self, owner: OwnerId, order_id: OrderId) {
        if let Some(mut orders) = self.user_open_orders.get_mut(&owner) {
            orders.shift_remove(&order_id);
        }
    }
}
