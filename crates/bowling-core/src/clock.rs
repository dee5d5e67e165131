//! Time source for game and roll timestamps.

use chrono::{DateTime, Utc};

/// Supplies `occurred_at` for new game events.
///
/// Handlers take a `&dyn Clock` so a game's `created_at` can be pinned in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the server binary.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
