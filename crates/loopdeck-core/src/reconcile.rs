#![forbid(unsafe_code)]

//! Silent wrap-around after a scroll burst settles.
//!
//! # State machine
//!
//! ```text
//! ┌──────┐  scroll event   ┌──────────┐  100ms quiet   ┌────────────┐
//! │ Idle │───────────────▶│ Settling │───────────────▶│ reconcile()│──▶ Idle
//! └──────┘                 └──────────┘                └────────────┘
//!                            │    ▲
//!                            └────┘ scroll event (restart window)
//! ```
//!
//! A correction is a non-animated jump of exactly one lap (`pitch·N`). Smooth
//! scrolling is switched off immediately before the jump and switched back on
//! at the next animation frame, so the browser never animates the rewind.

use core::time::Duration;

use crate::geometry::{Drift, LogicalWindow};
use crate::host::ScrollHost;
use crate::timer::Debounce;

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// Offset already inside the logical window.
    None,
    /// Viewer was in the tail clones; jumped forward one lap.
    Forward { from: f64, to: f64 },
    /// Viewer was in the head clones; jumped back one lap.
    Backward { from: f64, to: f64 },
}

impl Correction {
    #[must_use]
    pub const fn is_jump(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Target offset, if a jump is needed.
    #[must_use]
    pub const fn target(&self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Forward { to, .. } | Self::Backward { to, .. } => Some(*to),
        }
    }
}

/// Decide the correction for `offset` without touching the host.
#[must_use]
pub fn plan_correction(offset: f64, window: &LogicalWindow) -> Correction {
    match window.classify(offset) {
        Drift::Inside => Correction::None,
        Drift::Leading => Correction::Forward {
            from: offset,
            to: offset + window.span,
        },
        Drift::Trailing => Correction::Backward {
            from: offset,
            to: offset - window.span,
        },
    }
}

/// Observable reconciler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    Idle,
    Settling,
}

/// Read-back distance under which an offset counts as our own landing spot.
/// Browsers round `scrollLeft` to device pixels.
const LANDING_EPSILON: f64 = 1.0;

/// Scroll-settle debounce, the pending smooth-scroll restore, and the spot
/// the last silent jump landed on.
///
/// A jump fires its own scroll event, so a second pass always follows. If the
/// offset still sits on the landing spot that pass does nothing: with a
/// tolerance below half a pitch the landing can itself be outside the band,
/// and jumping again would bounce straight back.
#[derive(Debug, Clone)]
pub struct Reconciler {
    settle: Debounce,
    restore_smooth: bool,
    landing: Option<f64>,
}

impl Reconciler {
    #[must_use]
    pub const fn new(settle: Duration) -> Self {
        Self {
            settle: Debounce::new(settle),
            restore_smooth: false,
            landing: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ReconcilerState {
        if self.settle.is_pending() {
            ReconcilerState::Settling
        } else {
            ReconcilerState::Idle
        }
    }

    /// Record a raw scroll event.
    pub fn on_scroll(&mut self, now: Duration) {
        self.settle.restart(now);
    }

    /// Returns `true` once when the scroll burst has settled.
    pub fn settled(&mut self, now: Duration) -> bool {
        self.settle.fire(now)
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.settle.deadline()
    }

    /// Plan and perform the correction for the host's current offset.
    pub fn reconcile<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        window: &LogicalWindow,
    ) -> Correction {
        let offset = host.scroll_offset();
        if self
            .landing
            .is_some_and(|spot| (offset - spot).abs() < LANDING_EPSILON)
        {
            return Correction::None;
        }
        self.landing = None;
        let correction = plan_correction(offset, window);
        self.apply(host, correction);
        correction
    }

    /// Perform `correction` on `host` as a silent jump.
    pub fn apply<H: ScrollHost + ?Sized>(&mut self, host: &mut H, correction: Correction) {
        if let Some(target) = correction.target() {
            host.set_smooth_scrolling(false);
            host.set_scroll_offset(target);
            self.restore_smooth = true;
            self.landing = Some(host.scroll_offset());
        }
    }

    /// Forget the last landing spot, e.g. after an explicit re-anchor.
    pub fn forget_landing(&mut self) {
        self.landing = None;
    }

    /// Whether smooth scrolling still has to be switched back on.
    #[must_use]
    pub const fn restore_pending(&self) -> bool {
        self.restore_smooth
    }

    /// Consume the pending restore. Call from an animation frame.
    pub fn take_restore(&mut self) -> bool {
        std::mem::take(&mut self.restore_smooth)
    }
}
