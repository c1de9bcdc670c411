#![forbid(unsafe_code)]

//! The looping carousel controller.
//!
//! One [`Carousel`] owns everything a single scroll container needs: its
//! padded [`Sequence`], the scroll-settle and resize debounces, the navigation
//! lock, and the pending initial anchor. Several carousels on one page are
//! fully independent.
//!
//! # Host contract
//!
//! The host forwards callbacks with explicit timestamps and owns scheduling:
//!
//! | Callback | Controller call |
//! |----------|-----------------|
//! | animation frame | [`Carousel::on_animation_frame`] |
//! | container `scroll` | [`Carousel::on_scroll`] |
//! | window `resize` | [`Carousel::on_resize`] |
//! | prev / next click | [`Carousel::go_previous`] / [`Carousel::go_next`] |
//! | timer | [`Carousel::tick`] |
//!
//! After each call the host should arm one timer for
//! [`Carousel::next_deadline`] and request an animation frame while
//! [`Carousel::wants_animation_frame`] is true.

use core::time::Duration;

use tracing::{debug, trace};

use crate::config::CarouselConfig;
use crate::geometry::{LogicalWindow, measure_pitch};
use crate::host::ScrollHost;
use crate::navigation::{Direction, NavOutcome, Navigator};
use crate::reconcile::{Correction, Reconciler};
use crate::sequence::Sequence;
use crate::timer::Debounce;

/// Lifecycle mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No items at all; the controls are left alone.
    Inert,
    /// Too few items to loop; the controls must be disabled.
    Disabled,
    /// Clones mounted, navigation and reconciliation active.
    Looping,
}

/// What a [`Carousel::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub correction: Correction,
    pub reanchored: bool,
    pub lock_released: bool,
}

impl TickReport {
    const IDLE: Self = Self {
        correction: Correction::None,
        reanchored: false,
        lock_released: false,
    };

    /// Whether the tick changed anything.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

/// Controller for one looping carousel.
#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    sequence: Sequence,
    mode: Mode,
    reconciler: Reconciler,
    navigator: Navigator,
    resize: Debounce,
    frames_until_anchor: Option<u32>,
}

impl Carousel {
    /// Controller for `original_count` mounted originals.
    ///
    /// The config is [`validated`](CarouselConfig::validated) first.
    #[must_use]
    pub fn new(original_count: usize, config: CarouselConfig) -> Self {
        let config = config.validated();
        let sequence = Sequence::for_config(original_count, &config);
        let mode = if original_count == 0 {
            Mode::Inert
        } else if sequence.is_looping() {
            Mode::Looping
        } else {
            Mode::Disabled
        };
        debug!(
            originals = original_count,
            clones = sequence.clone_count(),
            ?mode,
            "carousel created"
        );
        Self {
            reconciler: Reconciler::new(config.scroll_settle),
            navigator: Navigator::new(config.navigation_lock),
            resize: Debounce::new(config.resize_settle),
            frames_until_anchor: (mode == Mode::Looping).then_some(config.anchor_frames),
            config,
            sequence,
            mode,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn is_looping(&self) -> bool {
        matches!(self.mode, Mode::Looping)
    }

    #[must_use]
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Current pitch as rendered by `host`.
    #[must_use]
    pub fn pitch<H: ScrollHost + ?Sized>(&self, host: &H) -> f64 {
        measure_pitch(host, self.config.fallback_pitch)
    }

    /// Logical window for `pitch`.
    #[must_use]
    pub fn window(&self, pitch: f64) -> LogicalWindow {
        LogicalWindow::new(
            pitch,
            self.sequence.clone_count(),
            self.sequence.original_count(),
            self.config.wrap_tolerance,
        )
    }

    /// Offset that shows the first original, `pitch·K`.
    #[must_use]
    pub fn anchor_offset(&self, pitch: f64) -> f64 {
        pitch * self.sequence.clone_count() as f64
    }

    /// Original shown as the primary item at `offset`.
    #[must_use]
    pub fn logical_index(&self, offset: f64, pitch: f64) -> Option<usize> {
        if pitch <= 0.0 || !offset.is_finite() {
            return None;
        }
        let mounted = (offset / pitch).round();
        if mounted < 0.0 {
            return None;
        }
        self.sequence.get(mounted as usize).map(|slot| slot.source)
    }

    /// Original currently primary in `host`.
    #[must_use]
    pub fn current_index<H: ScrollHost + ?Sized>(&self, host: &H) -> Option<usize> {
        self.logical_index(host.scroll_offset(), self.pitch(host))
    }

    /// Jump (without animation) to the first original using a fresh pitch.
    pub fn anchor<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if !self.is_looping() {
            return;
        }
        let pitch = self.pitch(host);
        let offset = self.anchor_offset(pitch);
        host.set_smooth_scrolling(false);
        host.set_scroll_offset(offset);
        host.set_smooth_scrolling(true);
        self.reconciler.forget_landing();
        debug!(pitch, offset, "carousel anchored");
    }

    /// Animation-frame callback: restores smooth scrolling after a silent
    /// wrap and counts down to the initial anchor.
    pub fn on_animation_frame<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.reconciler.take_restore() {
            host.set_smooth_scrolling(true);
        }
        match self.frames_until_anchor {
            Some(n) if n <= 1 => {
                self.frames_until_anchor = None;
                self.anchor(host);
            }
            Some(n) => self.frames_until_anchor = Some(n - 1),
            None => {}
        }
    }

    /// Whether the host should deliver another animation frame.
    #[must_use]
    pub const fn wants_animation_frame(&self) -> bool {
        self.frames_until_anchor.is_some() || self.reconciler.restore_pending()
    }

    /// Raw scroll event from the container (user drag or programmatic).
    pub fn on_scroll(&mut self, now: Duration) {
        if self.is_looping() {
            self.reconciler.on_scroll(now);
        }
    }

    /// Raw viewport resize event.
    pub fn on_resize(&mut self, now: Duration) {
        if self.is_looping() {
            self.resize.restart(now);
        }
    }

    /// Step to the next item.
    pub fn go_next<H: ScrollHost + ?Sized>(&mut self, host: &mut H, now: Duration) -> NavOutcome {
        self.navigate(host, Direction::Next, now)
    }

    /// Step to the previous item.
    pub fn go_previous<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        now: Duration,
    ) -> NavOutcome {
        self.navigate(host, Direction::Previous, now)
    }

    /// Step in `direction`, subject to the animation lock.
    pub fn navigate<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        direction: Direction,
        now: Duration,
    ) -> NavOutcome {
        if !self.is_looping() {
            return NavOutcome::Disabled;
        }
        let fallback = self.config.fallback_pitch;
        let outcome = self.navigator.request(host, direction, now, fallback);
        if let NavOutcome::Scrolled { delta } = outcome {
            debug!(?direction, delta, "carousel step");
        }
        outcome
    }

    /// Reconcile now, regardless of the settle debounce.
    pub fn reconcile<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> Correction {
        if !self.is_looping() {
            return Correction::None;
        }
        let pitch = self.pitch(host);
        let window = self.window(pitch);
        let correction = self.reconciler.reconcile(host, &window);
        if correction.is_jump() {
            debug!(?correction, pitch, "carousel wrapped");
        } else {
            trace!(offset = host.scroll_offset(), pitch, "carousel inside logical window");
        }
        correction
    }

    /// Fire every timer that is due at `now`.
    ///
    /// Order: lock release, scroll reconciliation, resize re-anchor.
    pub fn tick<H: ScrollHost + ?Sized>(&mut self, host: &mut H, now: Duration) -> TickReport {
        let mut report = TickReport::IDLE;
        if !self.is_looping() {
            return report;
        }
        report.lock_released = self.navigator.release_if_due(now);
        if self.reconciler.settled(now) {
            report.correction = self.reconcile(host);
        }
        if self.resize.fire(now) {
            self.anchor(host);
            report.reanchored = true;
        }
        report
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.reconciler.deadline(),
            self.resize.deadline(),
            self.navigator.lock_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostOp, RecordingHost};
    use pretty_assertions::assert_eq;

    const fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn anchored(n: usize, pitch: f64) -> (Carousel, RecordingHost) {
        let mut carousel = Carousel::new(n, CarouselConfig::default());
        let mut host = RecordingHost::new(carousel.sequence().len(), pitch);
        carousel.on_animation_frame(&mut host);
        carousel.on_animation_frame(&mut host);
        host.take_ops();
        (carousel, host)
    }

    #[test]
    fn modes_follow_item_count() {
        assert_eq!(Carousel::new(0, CarouselConfig::default()).mode(), Mode::Inert);
        assert_eq!(Carousel::new(1, CarouselConfig::default()).mode(), Mode::Disabled);
        assert_eq!(Carousel::new(2, CarouselConfig::default()).mode(), Mode::Disabled);
        assert_eq!(Carousel::new(3, CarouselConfig::default()).mode(), Mode::Looping);
    }

    #[test]
    fn low_min_loop_items_still_disables_two_cards() {
        let config = CarouselConfig::from_json(r#"{ "min_loop_items": 2 }"#).unwrap();
        assert_eq!(config.min_loop_items, 3);
        let carousel = Carousel::new(2, config);
        assert_eq!(carousel.mode(), Mode::Disabled);
        assert_eq!(carousel.sequence().len(), 2);

        let lowered = CarouselConfig {
            min_loop_items: 1,
            ..CarouselConfig::default()
        };
        assert_eq!(Carousel::new(1, lowered).mode(), Mode::Disabled);
    }

    #[test]
    fn disabled_carousel_ignores_everything() {
        let mut carousel = Carousel::new(2, CarouselConfig::default());
        let mut host = RecordingHost::new(2, 300.0);
        assert!(!carousel.wants_animation_frame());
        assert_eq!(carousel.go_next(&mut host, ms(0)), NavOutcome::Disabled);
        carousel.on_scroll(ms(0));
        carousel.on_resize(ms(0));
        assert_eq!(carousel.next_deadline(), None);
        assert!(carousel.tick(&mut host, ms(1000)).is_idle());
        assert!(host.ops().is_empty());
    }

    #[test]
    fn anchor_waits_for_two_frames() {
        let mut carousel = Carousel::new(5, CarouselConfig::default());
        let mut host = RecordingHost::new(13, 300.0);
        assert!(carousel.wants_animation_frame());

        carousel.on_animation_frame(&mut host);
        assert!(host.ops().is_empty());
        assert!(carousel.wants_animation_frame());

        carousel.on_animation_frame(&mut host);
        assert_eq!(
            host.ops(),
            &[
                HostOp::Smooth(false),
                HostOp::SetOffset(1200.0),
                HostOp::Smooth(true)
            ]
        );
        assert!(!carousel.wants_animation_frame());
        assert_eq!(carousel.current_index(&host), Some(0));
    }

    #[test]
    fn scroll_burst_reconciles_once_after_quiet_window() {
        let (mut carousel, mut host) = anchored(5, 300.0);
        host.drag_to(900.0);
        carousel.on_scroll(ms(0));
        carousel.on_scroll(ms(50));
        assert_eq!(carousel.next_deadline(), Some(ms(150)));

        assert!(carousel.tick(&mut host, ms(100)).is_idle());
        let report = carousel.tick(&mut host, ms(150));
        assert_eq!(
            report.correction,
            Correction::Forward {
                from: 900.0,
                to: 2400.0
            }
        );
        assert_eq!(host.offset(), 2400.0);
        assert!(!host.is_smooth());

        // Smooth scrolling comes back on the next frame.
        assert!(carousel.wants_animation_frame());
        carousel.on_animation_frame(&mut host);
        assert!(host.is_smooth());
        assert_eq!(carousel.current_index(&host), Some(4));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let (mut carousel, mut host) = anchored(5, 300.0);
        host.drag_to(3000.0);
        assert!(carousel.reconcile(&mut host).is_jump());
        let after_first = host.offset();
        assert_eq!(carousel.reconcile(&mut host), Correction::None);
        assert_eq!(host.offset(), after_first);
    }

    #[test]
    fn resize_reanchors_with_fresh_pitch() {
        let (mut carousel, mut host) = anchored(5, 300.0);
        host.set_pitch(220.0);
        carousel.on_resize(ms(0));
        carousel.on_resize(ms(100));
        assert!(carousel.tick(&mut host, ms(250)).is_idle());
        let report = carousel.tick(&mut host, ms(350));
        assert!(report.reanchored);
        assert_eq!(host.offset(), 880.0);
    }

    #[test]
    fn next_deadline_is_earliest_timer() {
        let (mut carousel, mut host) = anchored(5, 300.0);
        carousel.go_next(&mut host, ms(0));
        carousel.on_resize(ms(0));
        carousel.on_scroll(ms(10));
        assert_eq!(carousel.next_deadline(), Some(ms(110)));
        carousel.tick(&mut host, ms(110));
        assert_eq!(carousel.next_deadline(), Some(ms(250)));
        carousel.tick(&mut host, ms(250));
        assert_eq!(carousel.next_deadline(), Some(ms(400)));
        let report = carousel.tick(&mut host, ms(400));
        assert!(report.lock_released);
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn logical_index_maps_clones_to_sources() {
        let carousel = Carousel::new(5, CarouselConfig::default());
        assert_eq!(carousel.logical_index(0.0, 300.0), Some(1));
        assert_eq!(carousel.logical_index(1200.0, 300.0), Some(0));
        assert_eq!(carousel.logical_index(2100.0, 300.0), Some(3));
        assert_eq!(carousel.logical_index(3600.0, 300.0), Some(3));
        assert_eq!(carousel.logical_index(3900.0, 300.0), None);
        assert_eq!(carousel.logical_index(-400.0, 300.0), None);
        assert_eq!(carousel.logical_index(100.0, 0.0), None);
    }
}
