//! Ordered price index for one side of the book (spec §4.2).
//!
//! Spec's crit-bit tree is one legal implementation among several ("any
//! ordered index... suffices"); this crate keeps the data structure the
//! teacher already uses for exactly this job. `orderbook/book.rs` keys a
//! `crossbeam_skiplist::SkipMap<u128, Arc<PriceLevel>>` per side and
//! comments that the map's own ordering gives O(1) best-bid/best-ask and
//! O(log n) insert/remove "eliminating the need for a separate sorted
//! index" — the exact property C2 asks for. `BookSide` does the same
//! thing one level down (keyed directly by `price: Price`, no `Arc`
//! indirection since a single pool only ever touches its own book from one
//! thread at a time, per spec §5), and the skip map's key *is* the
//! "handle" C2's operations return — there is no separate handle table.

use crate::level::Level;
use crate::types::Price;
use crossbeam_skiplist::SkipMap;
use std::ops::Bound;

/// Which end of the side is "best" for matching purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// The side's minimum price.
    Min,
    /// The side's maximum price.
    Max,
}

/// One side (bids or asks) of a pool's order book: every resting price
/// level, ordered by price.
#[derive(Debug, Default)]
pub struct BookSide {
    levels: SkipMap<Price, Level>,
}

impl BookSide {
    /// An empty side.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: SkipMap::new(),
        }
    }

    /// `true` if this side has no resting levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The number of distinct price levels.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// The lowest-priced level, if any.
    #[must_use]
    pub fn min_leaf(&self) -> Option<Price> {
        self.levels.front().map(|e| *e.key())
    }

    /// The highest-priced level, if any.
    #[must_use]
    pub fn max_leaf(&self) -> Option<Price> {
        self.levels.back().map(|e| *e.key())
    }

    /// The level with the smallest price strictly greater than `price`.
    #[must_use]
    pub fn next_leaf(&self, price: Price) -> Option<Price> {
        self.levels
            .lower_bound(Bound::Excluded(&price))
            .map(|e| *e.key())
    }

    /// The level with the largest price strictly less than `price`.
    #[must_use]
    pub fn previous_leaf(&self, price: Price) -> Option<Price> {
        self.levels
            .upper_bound(Bound::Excluded(&price))
            .map(|e| *e.key())
    }

    /// Looks up the level at exactly `price`.
    #[must_use]
    pub fn find_leaf(&self, price: Price) -> bool {
        self.levels.contains_key(&price)
    }

    /// Finds the closest resting price to `price` on the side whose
    /// "towards best" direction is given by `extreme`: for `Extreme::Max`
    /// (bids, when walking down from a ceiling) this looks for the
    /// greatest price `<= price`; for `Extreme::Min` (asks, walking up from
    /// a floor) it looks for the smallest price `>= price`. Used by C8's
    /// level-2 range queries and by price-limited matching (spec §4.6).
    #[must_use]
    pub fn find_closest_key(&self, price: Price, extreme: Extreme) -> Option<Price> {
        match extreme {
            Extreme::Max => self
                .levels
                .upper_bound(Bound::Included(&price))
                .map(|e| *e.key()),
            Extreme::Min => self
                .levels
                .lower_bound(Bound::Included(&price))
                .map(|e| *e.key()),
        }
    }

    /// Runs `f` against the level at `price`, if one exists.
    pub fn with_level<R>(&self, price: Price, f: impl FnOnce(&Level) -> R) -> Option<R> {
        self.levels.get(&price).map(|e| f(e.value()))
    }

    /// Runs `f` against the mutable level at `price`, creating an empty
    /// level first if none exists yet.
    pub fn with_level_mut_or_insert<R>(&self, price: Price, f: impl FnOnce(&mut Level) -> R) -> R {
        // crossbeam_skiplist entries are shared (`&Level`), so mutation
        // happens through an interior-mutable clone-and-replace: we read,
        // mutate a local copy, and reinsert. Single-threaded pool
        // operations (spec §5) make this safe — no concurrent writer can
        // observe the level between the read and the reinsert.
        let mut level = self
            .levels
            .get(&price)
            .map(|e| e.value().clone())
            .unwrap_or_default();
        let result = f(&mut level);
        if level.is_empty() {
            self.levels.remove(&price);
        } else {
            self.levels.insert(price, level);
        }
        result
    }

    /// Inserts an empty level at `price` if none exists, returning whether
    /// one was created.
    pub fn ensure_leaf(&self, price: Price) -> bool {
        if self.levels.contains_key(&price) {
            false
        } else {
            self.levels.insert(price, Level::new());
            true
        }
    }

    /// Removes the level at `price` outright, regardless of whether it is
    /// empty. Used once matching has already drained it (spec §4.2: an
    /// emptied level is removed from the index).
    pub fn remove_leaf(&self, price: Price) {
        self.levels.remove(&price);
    }

    /// Iterates levels from lowest to highest price.
    pub fn iter_ascending(&self) -> impl Iterator<Item = (Price, Level)> + '_ {
        self.levels.iter().map(|e| (*e.key(), e.value().clone()))
    }

    /// Iterates levels from highest to lowest price.
    pub fn iter_descending(&self) -> impl Iterator<Item = (Price, Level)> + '_ {
        self.levels
            .iter()
            .rev()
            .map(|e| (*e.key(), e.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::OwnerId;
    use crate::types::{Order, TIMESTAMP_INF};

    fn order(id: u64, price: Price) -> Order {
        Order {
            id,
            price,
            quantity: 10,
            is_bid: true,
            owner: OwnerId([0u8; 32]),
            expire_timestamp_ms: TIMESTAMP_INF,
        }
    }

    #[test]
    fn min_and_max_track_extremes() {
        let side = BookSide::new();
        side.with_level_mut_or_insert(100, |l| l.push_back(order(1, 100)));
        side.with_level_mut_or_insert(200, |l| l.push_back(order(2, 200)));
        side.with_level_mut_or_insert(150, |l| l.push_back(order(3, 150)));
        assert_eq!(side.min_leaf(), Some(100));
        assert_eq!(side.max_leaf(), Some(200));
    }

    #[test]
    fn next_and_previous_leaf_walk_neighbors() {
        let side = BookSide::new();
        for price in [100, 150, 200] {
            side.with_level_mut_or_insert(price, |l| l.push_back(order(price, price)));
        }
        assert_eq!(side.next_leaf(100), Some(150));
        assert_eq!(side.next_leaf(200), None);
        assert_eq!(side.previous_leaf(200), Some(150));
        assert_eq!(side.previous_leaf(100), None);
    }

    #[test]
    fn empty_level_is_removed_after_drain() {
        let side = BookSide::new();
        side.with_level_mut_or_insert(100, |l| l.push_back(order(1, 100)));
        side.with_level_mut_or_insert(100, |l| {
            l.remove(1);
        });
        assert!(!side.find_leaf(100));
        assert!(side.is_empty());
    }

    #[test]
    fn find_closest_key_directions() {
        let side = BookSide::new();
        for price in [100, 200, 300] {
            side.with_level_mut_or_insert(price, |l| l.push_back(order(price, price)));
        }
        assert_eq!(side.find_closest_key(250, Extreme::Max), Some(200));
        assert_eq!(side.find_closest_key(250, Extreme::Min), Some(300));
        assert_eq!(side.find_closest_key(200, Extreme::Max), Some(200));
    }
}
