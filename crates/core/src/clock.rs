//! Time source abstraction
//!
//! The idle timer never reads the wall clock directly so threshold
//! boundaries can be tested deterministically.

use std::rc::Rc;

/// Source of "now" in milliseconds since the Unix epoch
pub trait Clock {
    fn now_millis(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for Rc<T> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Wall clock backed by chrono (uses `Date.now()` on wasm32)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(any(test, feature = "tests"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "tests"))]
mod manual {
    use super::Clock;
    use std::cell::Cell;
    use std::time::Duration;

    /// Clock that only moves when told to
    #[derive(Debug, Default)]
    pub struct ManualClock {
        now: Cell<i64>,
    }

    impl ManualClock {
        pub fn at(millis: i64) -> Self {
            Self {
                now: Cell::new(millis),
            }
        }

        pub fn set(&self, millis: i64) {
            self.now.set(millis);
        }

        pub fn advance(&self, by: Duration) {
            let by = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
            self.now.set(self.now.get().saturating_add(by));
        }

        pub fn rewind(&self, by: Duration) {
            let by = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
            self.now.set(self.now.get().saturating_sub(by));
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.now.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_manual_clock_moves_only_when_told() {
        let clock = ManualClock::at(1_000);
        assert_eq!(clock.now_millis(), 1_000);

        clock.advance(Duration::from_secs(2));
        assert_eq!(clock.now_millis(), 3_000);

        clock.rewind(Duration::from_millis(500));
        assert_eq!(clock.now_millis(), 2_500);

        clock.set(42);
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_shared_clock_delegates() {
        let clock = Rc::new(ManualClock::at(7));
        let shared = Rc::clone(&clock);
        clock.advance(Duration::from_millis(3));
        assert_eq!(shared.now_millis(), 10);
    }
}
