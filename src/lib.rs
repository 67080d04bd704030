//! # clob-core
//!
//! A single-pair central limit order book (CLOB) matching engine with a
//! custodial balance ledger: price-time priority matching over ordered
//! price levels, deterministic integer fee/rebate accounting, and
//! time-in-force order policies (spec.md §1–§9).
//!
//! ## Shape
//!
//! - [`fixed_point`] (C1): scaled multiply/divide with explicit round-up
//!   accounting.
//! - [`pool::BookSide`] + [`level::Level`] (C2/C3): the ordered price index
//!   and its per-price FIFO queues.
//! - [`custodian::Custodian`] (C4): per-user available/locked balances for
//!   one asset.
//! - [`pool::Pool`] (C5–C8): the trading pair itself — order id allocation,
//!   the matching engine, order lifecycle (inject/place/cancel), and the
//!   read-only query surface.
//!
//! Asset identity is carried as a phantom type parameter (spec §9 Design
//! Notes): `Pool<Base, Quote, Fee>` and `Custodian<Asset>` are generic over
//! zero-sized marker types, so two pools for different pairs can never be
//! confused even though the underlying ledgers are both plain `u64`
//! balances.
//!
//! Execution is single-threaded and transactional (spec §5): every public
//! operation on [`pool::Pool`] runs to completion or fails outright with no
//! partial settlement visible to callers.

pub mod capability;
pub mod custodian;
pub mod error;
pub mod events;
pub mod fixed_point;
pub mod level;
pub mod pool;
pub mod types;
pub mod utils;

pub use capability::{OwnerId, TradeCap};
pub use custodian::{Account, Custodian, CustodianError};
pub use error::{OrderBookError, Result};
pub use events::{Event, EventLog, Fill};
pub use pool::{
    CancelAllResult, CancelBatchResult, Level2BookStatus, LimitOrderResult, MarketOrderResult,
    MatchOutcome, Pool, CREATION_FEE, REFERENCE_MAKER_REBATE_RATE, REFERENCE_TAKER_FEE_RATE,
    SCALE,
};
pub use types::{
    is_bid_id, Order, OrderId, Price, Quantity, Restriction, Side, MAX_PRICE, MIN_ASK_ORDER_ID,
    MIN_BID_ORDER_ID, TIMESTAMP_INF,
};
