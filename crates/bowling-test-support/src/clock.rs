//! Pinned time for asserting `created_at` and `occurred_at`.

use bowling_core::clock::Clock;
use chrono::{DateTime, Utc};

/// Stamps every game event with the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
