//! Replay protection via the `webhookTimestamp` field.
//!
//! Linear includes the delivery time (milliseconds since the Unix epoch) in
//! the signed body. A delivery whose timestamp is too far from our wall clock
//! in either direction is rejected: old timestamps indicate a replay, future
//! ones indicate a skewed or forged sender.

use chrono::Utc;

/// Default freshness window: one minute either side of "now".
pub const DEFAULT_MAX_AGE_MS: u64 = 60_000;

/// Source of the current wall-clock time in milliseconds since the epoch.
///
/// Injected into the webhook pipeline so tests can pin "now".
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Returns the absolute distance between `webhook_timestamp_ms` and `now_ms`.
///
/// Saturates instead of overflowing for absurd inputs.
pub fn timestamp_skew_ms(webhook_timestamp_ms: i64, now_ms: i64) -> u64 {
    (i128::from(now_ms) - i128::from(webhook_timestamp_ms))
        .unsigned_abs()
        .try_into()
        .unwrap_or(u64::MAX)
}

/// Returns `true` if the timestamp is within `max_age_ms` of `now_ms`.
///
/// The window is symmetric and inclusive at its edge.
///
/// # Examples
///
/// ```
/// use linear_relay::webhooks::verify_freshness;
///
/// let now = 1_700_000_000_000;
/// assert!(verify_freshness(now - 60_000, now, 60_000));
/// assert!(!verify_freshness(now - 60_001, now, 60_000));
/// assert!(!verify_freshness(now + 60_001, now, 60_000));
/// ```
pub fn verify_freshness(webhook_timestamp_ms: i64, now_ms: i64, max_age_ms: u64) -> bool {
    timestamp_skew_ms(webhook_timestamp_ms, now_ms) <= max_age_ms
}
