#![forbid(unsafe_code)]

//! Monotonic time source.
//!
//! Controllers never call `Instant::now()` themselves: every operation that
//! depends on time receives `now` from the host, which usually reads it from a
//! [`Clock`]. The browser front end backs this with `performance.now()`.

use core::time::Duration;

/// Monotonic clock abstraction.
pub trait Clock {
    /// Returns elapsed time since an unspecified epoch, monotonically increasing.
    fn now_mono(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the caller.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Advance by `ms` milliseconds and return the new time.
    pub fn advance_ms(&mut self, ms: u64) -> Duration {
        self.advance(Duration::from_millis(ms));
        self.now
    }
}

impl Clock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deterministic_clock_advances_monotonically() {
        let mut c = DeterministicClock::new();
        assert_eq!(c.now_mono(), Duration::ZERO);

        c.advance(Duration::from_millis(100));
        assert_eq!(c.now_mono(), Duration::from_millis(100));

        assert_eq!(c.advance_ms(300), Duration::from_millis(400));

        // Saturates instead of wrapping.
        c.set(Duration::MAX);
        c.advance(Duration::from_secs(1));
        assert_eq!(c.now_mono(), Duration::MAX);
    }
}
