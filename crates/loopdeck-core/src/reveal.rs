#![forbid(unsafe_code)]

//! Reveal-on-scroll policy.
//!
//! Elements tagged for reveal gain a visible marker exactly once, the first
//! time enough of them intersects the viewport. Carousel clones are mounted
//! already visible and are never observed.

use crate::config::RevealConfig;

/// Browsers report ratios a hair under the observer threshold at the crossing.
const RATIO_SLACK: f64 = 1e-3;

/// One intersection report for an observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealEntry {
    pub is_intersecting: bool,
    pub ratio: f64,
    pub already_revealed: bool,
}

/// What to do with an intersection report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealDecision {
    /// Leave the element alone and keep observing.
    Ignore,
    /// Add the visible marker and stop observing.
    Reveal,
    /// Already visible; stop observing.
    Forget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealPolicy {
    threshold: f64,
}

impl RevealPolicy {
    #[must_use]
    pub fn new(config: &RevealConfig) -> Self {
        let threshold = if config.threshold.is_finite() {
            config.threshold.clamp(0.0, 1.0)
        } else {
            crate::config::DEFAULT_REVEAL_THRESHOLD
        };
        Self { threshold }
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Clones are presentational and never observed.
    #[must_use]
    pub const fn should_observe(&self, is_clone: bool) -> bool {
        !is_clone
    }

    #[must_use]
    pub fn decide(&self, entry: RevealEntry) -> RevealDecision {
        if entry.already_revealed {
            return RevealDecision::Forget;
        }
        if entry.is_intersecting && entry.ratio + RATIO_SLACK >= self.threshold {
            RevealDecision::Reveal
        } else {
            RevealDecision::Ignore
        }
    }
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self::new(&RevealConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(is_intersecting: bool, ratio: f64) -> RevealEntry {
        RevealEntry {
            is_intersecting,
            ratio,
            already_revealed: false,
        }
    }

    #[test]
    fn reveals_at_threshold() {
        let policy = RevealPolicy::default();
        assert_eq!(policy.decide(entry(true, 0.12)), RevealDecision::Reveal);
        assert_eq!(policy.decide(entry(true, 0.1195)), RevealDecision::Reveal);
        assert_eq!(policy.decide(entry(true, 1.0)), RevealDecision::Reveal);
    }

    #[test]
    fn ignores_small_or_leaving_entries() {
        let policy = RevealPolicy::default();
        assert_eq!(policy.decide(entry(true, 0.05)), RevealDecision::Ignore);
        assert_eq!(policy.decide(entry(false, 0.0)), RevealDecision::Ignore);
    }

    #[test]
    fn revealed_elements_are_forgotten() {
        let policy = RevealPolicy::default();
        let e = RevealEntry {
            already_revealed: true,
            ..entry(true, 1.0)
        };
        assert_eq!(policy.decide(e), RevealDecision::Forget);
    }

    #[test]
    fn clones_are_never_observed() {
        let policy = RevealPolicy::default();
        assert!(policy.should_observe(false));
        assert!(!policy.should_observe(true));
    }

    #[test]
    fn threshold_is_clamped() {
        let cfg = RevealConfig {
            threshold: 4.0,
            ..RevealConfig::default()
        };
        assert_eq!(RevealPolicy::new(&cfg).threshold(), 1.0);
    }
}
