//! Top-level error type, aggregating every failure surface the pool exposes
//! (spec §7 error taxonomy).
//!
//! One `thiserror`-derived, `#[non_exhaustive]` enum per the teacher's own
//! `orderbook/error.rs` shape, with `From` conversions from the lower-level
//! component errors (`FixedPointError`, `CustodianError`) so call sites can
//! use `?` throughout. Every variant aborts the whole call per spec §7 —
//! there are no partial-failure/recovery paths; nothing here is locally
//! recovered.

use crate::custodian::CustodianError;
use crate::fixed_point::FixedPointError;
use crate::types::{OrderId, Price, Quantity};
use thiserror::Error;

/// Everything that can go wrong creating a pool, placing, matching,
/// canceling, or querying orders.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderBookError {
    /// The custodian ledger rejected a lock/unlock/withdraw.
    #[error(transparent)]
    Custodian(#[from] CustodianError),

    /// A scaled multiply or divide underflowed or divided by zero.
    #[error(transparent)]
    FixedPoint(#[from] FixedPointError),

    /// Pool creation was asked to set `taker_fee_rate < maker_rebate_rate`
    /// (spec §3: "invariant `taker_fee_rate ≥ maker_rebate_rate`").
    #[error("taker fee rate {taker_fee_rate} is below maker rebate rate {maker_rebate_rate}")]
    InvalidFeeRateRebateRate {
        /// The rejected taker fee rate.
        taker_fee_rate: u64,
        /// The rejected maker rebate rate.
        maker_rebate_rate: u64,
    },

    /// Pool creation was asked to use the same asset as both base and quote.
    #[error("base and quote asset types must differ")]
    InvalidPair,

    /// Pool creation was not paid the exact `CREATION_FEE`.
    #[error("wrong creation fee: expected {expected}, got {actual}")]
    InvalidFee {
        /// The fixed creation fee (spec §6).
        expected: u64,
        /// The fee actually supplied.
        actual: u64,
    },

    /// `price` is not a positive multiple of the pool's `tick_size`.
    #[error("price {price} is not a multiple of the tick size")]
    InvalidPrice {
        /// The offending price.
        price: Price,
    },

    /// `quantity` is zero or not a multiple of the pool's `lot_size`.
    #[error("quantity {quantity} is invalid for this pool's lot size")]
    InvalidQuantity {
        /// The offending quantity.
        quantity: Quantity,
    },

    /// A `batch_cancel` id's recorded price is not present on its side.
    #[error("no resting level at the recorded price for order {order_id}")]
    InvalidTickPrice {
        /// The order whose recorded price could not be found.
        order_id: OrderId,
    },

    /// `expire_timestamp_ms <= now` at injection time.
    #[error("expire timestamp {expire_timestamp_ms} is not after now ({now})")]
    InvalidExpireTimestamp {
        /// The rejected expiry.
        expire_timestamp_ms: u64,
        /// The transaction's current time.
        now: u64,
    },

    /// An order referenced by id does not exist (or has already been
    /// filled/canceled/expired) for the calling owner.
    #[error("order {0} not found")]
    InvalidOrderId(OrderId),

    /// The calling capability's owner has no open-order index at all.
    #[error("caller has no open orders on this pool")]
    InvalidUser,

    /// The order's recorded owner does not match the order found in its
    /// level (defensive; spec §4.7.4 step 4 — should never trigger).
    #[error("order {order_id} is not owned by the calling capability")]
    UnauthorizedCancel {
        /// The order id the caller attempted to cancel.
        order_id: OrderId,
    },

    /// A market ask's taker did not supply enough base to cover `quantity`.
    #[error("insufficient base supplied: have {available}, need {required}")]
    InsufficientBaseCoin {
        /// Base actually supplied.
        available: Quantity,
        /// Base the order requires.
        required: Quantity,
    },

    /// A taker did not supply enough quote to cover a limit bid's collateral.
    #[error("insufficient quote supplied: have {available}, need {required}")]
    InsufficientQuoteCoin {
        /// Quote actually supplied.
        available: Quantity,
        /// Quote the order requires.
        required: Quantity,
    },

    /// A market ask's taker wallet amount was zero where non-zero is
    /// required.
    #[error("invalid base coin: zero quantity supplied")]
    InvalidBaseCoin,

    /// A `FillOrKill` order could not be filled in full against the
    /// available liquidity.
    #[error("fill-or-kill order could not be filled in full")]
    OrderCannotBeFullyFilled,

    /// A `PostOrAbort` order would have crossed the book and taken
    /// liquidity.
    #[error("post-or-abort order would have crossed the book and taken liquidity")]
    OrderCannotBeFullyPassive,

    /// A decoded restriction byte did not match any `Restriction` variant.
    #[error("invalid restriction value: {0}")]
    InvalidRestriction(u8),
}

/// Convenience alias used throughout the pool modules.
pub type Result<T> = std::result::Result<T, OrderBookError>;
