#![forbid(unsafe_code)]

//! Host seam between the controller and a rendered scroll container.
//!
//! The controller reads geometry and scroll position through [`ScrollHost`] and
//! asks for exactly three kinds of writes: a silent offset assignment, an
//! animated relative scroll, and toggling smooth scrolling. The browser front
//! end implements this over a real element; [`RecordingHost`] implements it in
//! memory for tests and host-less simulation.

/// Scroll container as seen by the controller.
pub trait ScrollHost {
    /// Leading (left) edges of the first two mounted items, in any shared
    /// coordinate space. `None` with fewer than two mounted items.
    fn leading_edges(&self) -> Option<(f64, f64)>;

    /// Current physical scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Assign the offset directly. Animates only if smooth scrolling is on.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Request an animated scroll relative to the current offset.
    fn scroll_by_animated(&mut self, delta: f64);

    /// Toggle the container's smooth scroll behavior.
    fn set_smooth_scrolling(&mut self, smooth: bool);
}

/// One host write, as recorded by [`RecordingHost`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostOp {
    SetOffset(f64),
    ScrollBy(f64),
    Smooth(bool),
}

/// In-memory host with a uniform item pitch.
///
/// Writes apply instantly (animations complete immediately) and are logged.
/// Item edges are reported relative to the viewport, so they move with the
/// offset exactly like `getBoundingClientRect` does.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    mounted: usize,
    pitch: f64,
    offset: f64,
    smooth: bool,
    ops: Vec<HostOp>,
}

impl RecordingHost {
    /// Host with `mounted` items spaced `pitch` apart, scrolled to `0`.
    #[must_use]
    pub fn new(mounted: usize, pitch: f64) -> Self {
        Self {
            mounted,
            pitch,
            offset: 0.0,
            smooth: true,
            ops: Vec::new(),
        }
    }

    /// Change the rendered pitch, e.g. after a simulated viewport resize.
    /// The offset is left untouched, as a browser would.
    pub fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch;
    }

    /// Simulate a user drag: moves the offset without logging a host write.
    pub fn drag_to(&mut self, offset: f64) {
        self.offset = self.clamp(offset);
    }

    /// Simulate a user drag by a relative amount.
    pub fn drag_by(&mut self, delta: f64) {
        self.drag_to(self.offset + delta);
    }

    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub const fn is_smooth(&self) -> bool {
        self.smooth
    }

    #[must_use]
    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    /// Drain the write log.
    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of animated scrolls requested so far.
    #[must_use]
    pub fn animated_scrolls(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, HostOp::ScrollBy(_)))
            .count()
    }

    fn max_offset(&self) -> f64 {
        self.pitch * self.mounted.saturating_sub(1) as f64
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset().max(0.0))
    }
}

impl ScrollHost for RecordingHost {
    fn leading_edges(&self) -> Option<(f64, f64)> {
        (self.mounted >= 2).then(|| (-self.offset, self.pitch - self.offset))
    }

    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.ops.push(HostOp::SetOffset(offset));
        self.offset = self.clamp(offset);
    }

    fn scroll_by_animated(&mut self, delta: f64) {
        self.ops.push(HostOp::ScrollBy(delta));
        self.offset = self.clamp(self.offset + delta);
    }

    fn set_smooth_scrolling(&mut self, smooth: bool) {
        self.ops.push(HostOp::Smooth(smooth));
        self.smooth = smooth;
    }
}
