//! Time source abstraction for the register engine.
//!
//! Ticket timestamps and scan-gap measurement both go through a [`Clock`]
//! rather than reading `Utc::now()` directly, so scanner-vs-typist timing
//! can be simulated deterministically in tests and scripted demos.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Source of the current UTC time.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time. The production clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Starts at the Unix epoch by default; `advance` steps it forward by a
/// `chrono::Duration`. Shared references can advance it, so it can sit
/// behind an `Arc` next to the register that reads it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += delta;
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, to: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = to;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_by_exact_deltas() {
        let clock = ManualClock::default();
        let start = clock.now();

        clock.advance(Duration::milliseconds(40));
        assert_eq!(clock.now() - start, Duration::milliseconds(40));

        clock.advance(Duration::seconds(2));
        assert_eq!(clock.now() - start, Duration::milliseconds(2040));
    }

    #[test]
    fn manual_clock_set_jumps_to_instant() {
        let clock = ManualClock::default();
        let target = DateTime::UNIX_EPOCH + Duration::days(365);
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn system_clock_is_monotonic_enough_for_gap_checks() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
