#![forbid(unsafe_code)]

//! Pitch measurement and the logical window.
//!
//! Pitch is never cached: responsive breakpoints and content reflow change it,
//! so every caller measures again through the host.

use crate::host::ScrollHost;

/// Pitch from two leading edges, or `fallback` when unmeasurable.
///
/// A missing pair, a non-finite distance, or a non-positive distance (layout
/// not settled yet) all yield `fallback`.
#[must_use]
pub fn pitch_from_edges(edges: Option<(f64, f64)>, fallback: f64) -> f64 {
    match edges {
        Some((first, second)) => {
            let pitch = second - first;
            if pitch.is_finite() && pitch > 0.0 {
                pitch
            } else {
                fallback
            }
        }
        None => fallback,
    }
}

/// Measure the distance between the leading edges of the first two mounted
/// items.
#[must_use]
pub fn measure_pitch<H: ScrollHost + ?Sized>(host: &H, fallback: f64) -> f64 {
    pitch_from_edges(host.leading_edges(), fallback)
}

/// Where an offset sits relative to the logical window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    /// Past the leading edge by more than the tolerance: showing tail clones.
    Leading,
    /// Within the window or its tolerance band.
    Inside,
    /// Past the trailing edge by more than the tolerance: showing head clones.
    Trailing,
}

/// Offset range in which an original is the primary visible item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalWindow {
    /// Offset of the first original (`pitch·K`).
    pub low: f64,
    /// Offset of the last original (`pitch·(K+N−1)`).
    pub high: f64,
    /// Allowed overshoot on either side.
    pub tolerance: f64,
    /// One full lap (`pitch·N`).
    pub span: f64,
}

impl LogicalWindow {
    #[must_use]
    pub fn new(pitch: f64, clones: usize, originals: usize, tolerance_ratio: f64) -> Self {
        let k = clones as f64;
        let n = originals as f64;
        Self {
            low: pitch * k,
            high: pitch * (k + n - 1.0),
            tolerance: pitch * tolerance_ratio,
            span: pitch * n,
        }
    }

    #[must_use]
    pub fn classify(&self, offset: f64) -> Drift {
        if offset < self.low - self.tolerance {
            Drift::Leading
        } else if offset > self.high + self.tolerance {
            Drift::Trailing
        } else {
            Drift::Inside
        }
    }
}
