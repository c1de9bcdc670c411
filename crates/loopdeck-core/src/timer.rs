#![forbid(unsafe_code)]

//! Debounce and cooldown windows as plain values.
//!
//! Both timers are passive: they store a deadline and answer questions about a
//! caller-supplied `now`. Hosts schedule a single wake-up for the earliest
//! pending deadline and feed the time back in.
//!
//! - [`Debounce`] restarts on every event and fires once after a quiet window.
//! - [`Cooldown`] is acquired once and ignores further requests until it
//!   expires.

use core::time::Duration;

/// Quiet-window timer restarted by every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Duration>,
}

impl Debounce {
    /// Create an idle debounce with the given quiet window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Length of the quiet window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Push the deadline to `now + window`, arming the timer if idle.
    pub fn restart(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.window));
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is armed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The armed deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Returns `true` exactly once when the armed deadline has passed.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Fixed-length lock that drops requests while held.
///
/// Release is time-based only; nothing observes whether the guarded work
/// actually finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    duration: Duration,
    until: Option<Duration>,
}

impl Cooldown {
    /// Create a released cooldown.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            until: None,
        }
    }

    /// Lock duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Take the lock if it is free (or has expired). Returns `false` if held.
    pub fn try_acquire(&mut self, now: Duration) -> bool {
        self.release_if_due(now);
        if self.until.is_some() {
            return false;
        }
        self.until = Some(now.saturating_add(self.duration));
        true
    }

    /// Whether the lock is held at `now`.
    #[must_use]
    pub fn is_held(&self, now: Duration) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Clear an expired lock. Returns `true` if this call released it.
    pub fn release_if_due(&mut self, now: Duration) -> bool {
        if let Some(until) = self.until
            && now >= until
        {
            self.until = None;
            return true;
        }
        false
    }

    /// When the held lock expires.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.until
    }
}
