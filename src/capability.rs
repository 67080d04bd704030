//! The per-user capability handle (spec §6, §9 Design Notes).
//!
//! Authorization in this crate is carried by a bearer token a user holds,
//! not by session/login state — the same shape the teacher's `pricelevel`
//! layer uses for its `Hash32` `user_id` (an opaque wide identity compared
//! only for equality). `TradeCap` wraps a `uuid::Uuid` (already a direct
//! teacher dependency, used there to mint order/transaction ids) and
//! derives a stable 256-bit [`OwnerId`] from it with `sha2::Sha256` (also
//! already a teacher dependency, there used for snapshot checksums) — reusing
//! both crates for a purpose the teacher itself puts them to elsewhere,
//! rather than adding a new hashing dependency.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A stable, opaque, 256-bit owner identity.
///
/// Two capabilities derived independently from the same underlying
/// identity compare equal; this is the only property C4 (the custodian
/// ledger) and C5 (`user_open_orders`) rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(pub [u8; 32]);

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..")
    }
}

/// A bearer capability authorizing debits from one user's `available`
/// balances (spec §4.4, §6). Holding a `TradeCap` is the only proof of
/// identity the core requires; it carries no session or login state.
#[derive(Debug, Clone, Copy)]
pub struct TradeCap {
    token: Uuid,
}

impl TradeCap {
    /// Mints a fresh capability with a new random identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: Uuid::new_v4(),
        }
    }

    /// Wraps an existing token, e.g. one restored from an external wallet.
    #[must_use]
    pub fn from_uuid(token: Uuid) -> Self {
        Self { token }
    }

    /// This capability's stable, wide owner id. Two `TradeCap`s minted from
    /// the same `Uuid` (e.g. via [`TradeCap::from_uuid`]) always agree.
    #[must_use]
    pub fn owner_id(&self) -> OwnerId {
        let mut hasher = Sha256::new();
        hasher.update(self.token.as_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        OwnerId(bytes)
    }
}

impl Default for TradeCap {
    fn default() -> Self {
        Self::new()
    }
}
