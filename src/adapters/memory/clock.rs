//! Clock frozen at a single instant.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Clock that always returns the instant it was built with.
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock frozen at `at`.
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
