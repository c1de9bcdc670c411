#![forbid(unsafe_code)]

//! Next/previous stepping behind an animation lock.
//!
//! Each accepted request issues one animated scroll of exactly one pitch and
//! holds the lock for a fixed cooldown. Requests arriving while the lock is
//! held are dropped, never queued: a burst of clicks collapses to the step
//! already in flight.

use core::time::Duration;

use tracing::trace;

use crate::geometry::measure_pitch;
use crate::host::ScrollHost;
use crate::timer::Cooldown;

/// Step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// `+1.0` for next, `-1.0` for previous.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Next => 1.0,
            Self::Previous => -1.0,
        }
    }
}

/// What a navigation request did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavOutcome {
    /// An animated scroll by `delta` was issued.
    Scrolled { delta: f64 },
    /// The lock was held; nothing happened.
    Dropped,
    /// Navigation is disabled for this carousel.
    Disabled,
}

/// Animation lock plus the step logic.
#[derive(Debug, Clone)]
pub struct Navigator {
    lock: Cooldown,
}

impl Navigator {
    #[must_use]
    pub const fn new(lock: Duration) -> Self {
        Self {
            lock: Cooldown::new(lock),
        }
    }

    /// Step one pitch in `direction` unless the lock is held.
    pub fn request<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        direction: Direction,
        now: Duration,
        fallback_pitch: f64,
    ) -> NavOutcome {
        if !self.lock.try_acquire(now) {
            trace!(?direction, "navigation dropped: animation lock held");
            return NavOutcome::Dropped;
        }
        let delta = direction.sign() * measure_pitch(host, fallback_pitch);
        host.scroll_by_animated(delta);
        NavOutcome::Scrolled { delta }
    }

    #[must_use]
    pub fn is_locked(&self, now: Duration) -> bool {
        self.lock.is_held(now)
    }

    /// Release an expired lock. Returns `true` on the releasing call.
    pub fn release_if_due(&mut self, now: Duration) -> bool {
        self.lock.release_if_due(now)
    }

    #[must_use]
    pub const fn lock_deadline(&self) -> Option<Duration> {
        self.lock.deadline()
    }
}
