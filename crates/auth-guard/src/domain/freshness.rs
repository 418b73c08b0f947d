//! # Freshness Validator
//!
//! Checks a caller-supplied timestamp against server time and a configured
//! TTL window. The window is symmetric: future-dated requests are rejected
//! the same as stale ones, so a caller cannot pre-sign a request with a
//! far-future timestamp and bank it for replay later.

/// Outcome of the freshness check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    /// `ts_diff_ms` is `server_now - claimed`: positive for stale requests,
    /// negative for future-dated ones. Surfaced for debuggability; never
    /// used to relax the check.
    Expired { ts_diff_ms: i64 },
}

/// A request is expired when the claimed timestamp is more than `ttl_ms`
/// away from server time in either direction. Exactly `ttl_ms` away is
/// still fresh.
pub fn check(claimed_ms: i64, server_now_ms: i64, ttl_ms: u64) -> Freshness {
    let diff = server_now_ms.saturating_sub(claimed_ms);
    let ttl = ttl_ms as i64;

    if diff > ttl || diff < -ttl {
        Freshness::Expired { ts_diff_ms: diff }
    } else {
        Freshness::Fresh
    }
}
