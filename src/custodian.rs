//! Custodial balance ledger (spec §4.4) — per-user `available`/`locked`
//! balances for one asset.
//!
//! Not present in the teacher crate (a price-level library has no funds to
//! custody); grounded instead on the `available`/`locked` balance-ledger
//! shape recurring through the retrieval pack's on-chain matching engines —
//! concretely the `available`/`required` insufficient-balance error in
//! `other_examples/.../afterburn-mexchange/.../order.rs`. Implemented over
//! `dashmap::DashMap`, already a direct teacher dependency used there for
//! its `order_locations` index (`orderbook/book.rs`) — reused here for the
//! same reason (fast keyed lookup), even though a single pool call in this
//! crate only ever touches it from one thread at a time (§5).

use crate::capability::{OwnerId, TradeCap};
use dashmap::DashMap;
use std::marker::PhantomData;
use thiserror::Error;

/// Errors raised by the custodian ledger. Every failure aborts the whole
/// call per spec §7 — nothing here is locally recovered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustodianError {
    /// `available` balance was smaller than the amount requested.
    #[error("insufficient available balance: available {available}, required {required}")]
    InsufficientAvailable {
        /// The balance actually available.
        available: u64,
        /// The balance the caller required.
        required: u64,
    },
    /// `locked` balance was smaller than the amount requested.
    #[error("insufficient locked balance: locked {locked}, required {required}")]
    InsufficientLocked {
        /// The balance actually locked.
        locked: u64,
        /// The balance the caller required.
        required: u64,
    },
    /// The capability presented does not authorize debiting this owner.
    #[error("capability does not authorize this owner's available balance")]
    Unauthorized,
}

/// One user's split balance for one asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Account {
    /// Freely spendable balance.
    pub available: u64,
    /// Balance reserved as collateral against open orders.
    pub locked: u64,
}

/// Per-user `(available, locked)` balances for a single asset, tagged at
/// the type level by `Asset` (spec §9 Design Notes: "model as generic
/// parameters"). Two custodians for different assets never share a key
/// space even if both happen to be `Custodian<()>`  in a test — callers
/// keep separate instances per asset, as `Pool` does for base/quote.
pub struct Custodian<Asset> {
    accounts: DashMap<OwnerId, Account>,
    _asset: PhantomData<Asset>,
}

impl<Asset> Custodian<Asset> {
    /// Creates an empty ledger for this asset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            _asset: PhantomData,
        }
    }

    fn entry_or_default(&self, owner: OwnerId) -> dashmap::mapref::one::RefMut<'_, OwnerId, Account> {
        self.accounts.entry(owner).or_default()
    }

    /// Credits `qty` to `owner`'s available balance. Accounts are created
    /// lazily on first touch (spec §3).
    pub fn deposit(&self, owner: OwnerId, qty: u64) {
        self.entry_or_default(owner).available += qty;
    }

    /// Debits `qty` from `owner`'s available balance. Requires the
    /// capability belong to `owner` (spec §4.4: only the owning capability
    /// may reduce `available`).
    pub fn withdraw(&self, cap: &TradeCap, owner: OwnerId, qty: u64) -> Result<(), CustodianError> {
        if cap.owner_id() != owner {
            return Err(CustodianError::Unauthorized);
        }
        let mut account = self.entry_or_default(owner);
        if account.available < qty {
            return Err(CustodianError::InsufficientAvailable {
                available: account.available,
                required: qty,
            });
        }
        account.available -= qty;
        Ok(())
    }

    /// Moves `qty` from `owner`'s available balance into locked collateral.
    /// Requires the capability belong to `owner`.
    pub fn lock(&self, cap: &TradeCap, owner: OwnerId, qty: u64) -> Result<(), CustodianError> {
        if cap.owner_id() != owner {
            return Err(CustodianError::Unauthorized);
        }
        let mut account = self.entry_or_default(owner);
        if account.available < qty {
            return Err(CustodianError::InsufficientAvailable {
                available: account.available,
                required: qty,
            });
        }
        account.available -= qty;
        account.locked += qty;
        Ok(())
    }

    /// Moves `qty` from `owner`'s locked collateral back to available.
    /// Unlike `withdraw`/`lock`, any caller may unlock a user's funds
    /// (spec §4.4: needed for expiry sweeps and cancel-all performed on the
    /// user's behalf); the identity that matters is `owner`, not the
    /// caller's capability.
    pub fn unlock(&self, owner: OwnerId, qty: u64) -> Result<(), CustodianError> {
        let mut account = self.entry_or_default(owner);
        if account.locked < qty {
            return Err(CustodianError::InsufficientLocked {
                locked: account.locked,
                required: qty,
            });
        }
        account.locked -= qty;
        account.available += qty;
        Ok(())
    }

    /// Reduces `owner`'s locked balance by `qty` without crediting it
    /// anywhere — the caller is responsible for routing the value
    /// onward (settlement building block, spec §4.4).
    pub fn decrease_locked(&self, owner: OwnerId, qty: u64) -> Result<(), CustodianError> {
        let mut account = self.entry_or_default(owner);
        if account.locked < qty {
            return Err(CustodianError::InsufficientLocked {
                locked: account.locked,
                required: qty,
            });
        }
        account.locked -= qty;
        Ok(())
    }

    /// Credits `owner`'s available balance with `qty` that came from
    /// elsewhere in a settlement (the counterpart to `decrease_locked`).
    pub fn increase_available(&self, owner: OwnerId, qty: u64) {
        self.entry_or_default(owner).available += qty;
    }

    /// Returns `owner`'s available balance (`0` if the account was never
    /// touched).
    #[must_use]
    pub fn available(&self, owner: OwnerId) -> u64 {
        self.accounts.get(&owner).map_or(0, |a| a.available)
    }

    /// Returns `owner`'s locked balance (`0` if the account was never
    /// touched).
    #[must_use]
    pub fn locked(&self, owner: OwnerId) -> u64 {
        self.accounts.get(&owner).map_or(0, |a| a.locked)
    }

    /// Returns `owner`'s full `(available, locked)` split.
    #[must_use]
    pub fn balance(&self, owner: OwnerId) -> (u64, u64) {
        self.accounts
            .get(&owner)
            .map_or((0, 0), |a| (a.available, a.locked))
    }
}

impl<Asset> Default for Custodian<Asset> {
    fn default() -> Self {
        Self::new()
    }
}
