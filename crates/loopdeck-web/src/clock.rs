#![forbid(unsafe_code)]

//! Monotonic clock backed by `performance.now()`.

use core::time::Duration;

use loopdeck_core::Clock;
use web_time::Instant;

/// Time since the clock was created.
///
/// On wasm this reads `performance.now()`, natively it is `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceClock {
    origin: Instant,
}

impl PerformanceClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now_mono(&self) -> Duration {
        self.origin.elapsed()
    }
}
