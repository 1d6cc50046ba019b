//! Time source abstraction.
//!
//! Reconciliation stamps `last_seen` with "now", so the current time is an
//! explicit dependency rather than a hidden global. Production code uses
//! [`SystemClock`]; tests construct with [`FixedClock`].

use chrono::{DateTime, TimeZone, Utc};

/// A source of the current wall-clock time
pub trait Clock: Send + Sync {
    /// Returns the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always returns the same instant, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Fixed clock at the given Unix timestamp (seconds)
    #[must_use]
    pub fn at_unix(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
