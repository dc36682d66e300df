//! Deterministic `Clock` for tests.

use chrono::{DateTime, TimeZone, Utc};
use spiritfood_core::clock::Clock;

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(fixed_time())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2026-01-15 12:00:00 UTC, the instant tests pin their clocks to.
///
/// # Panics
///
/// Never; the timestamp is a valid constant.
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}
