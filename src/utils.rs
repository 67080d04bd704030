//! Small helpers shared across the crate.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time in milliseconds since the Unix epoch.
///
/// The matching engine itself never calls this directly — every public
/// operation takes `now: u64` from the caller (§5: "external drivers
/// provide a monotonic millisecond clock") so that matching stays
/// deterministic given book state and `now`. This helper exists for callers
/// (and tests) that want a real wall clock to pass in.
#[must_use]
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
