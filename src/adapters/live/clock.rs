//! Live clock using the system clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Clock that reports the real wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_time_between_two_samples() {
        let before = Utc::now();
        let stamp = SystemClock.now();
        let after = Utc::now();

        assert!(before <= stamp && stamp <= after);
    }
}
