#![forbid(unsafe_code)]

//! Tunables for the carousel controller and the page collaborators.
//!
//! # Carousel defaults
//!
//! | Field | Default | Valid range | Meaning |
//! |-------|---------|-------------|---------|
//! | `max_clones` | 4 | ≥ 1 | Clones on each side (capped at the item count) |
//! | `min_loop_items` | 3 | ≥ 3 | Fewer originals disables navigation |
//! | `scroll_settle` | 100ms | any | Quiet window before reconciling |
//! | `resize_settle` | 250ms | any | Quiet window before re-anchoring |
//! | `navigation_lock` | 400ms | any | Cooldown after an animated step |
//! | `wrap_tolerance` | 0.3 | 0.0–0.5 | Overshoot allowed, in pitches |
//! | `fallback_pitch` | 300.0 | > 0 | Pitch used when layout is unmeasurable |
//! | `anchor_frames` | 2 | ≥ 1 | Animation frames to wait before anchoring |
//!
//! # Lookup keys
//!
//! [`CarouselConfig::from_lookup`] reads string overrides by key. The browser
//! front end maps each key to a `data-<key>` attribute on the container.
//!
//! | Key | Type |
//! |-----|------|
//! | `loop-max-clones` | usize |
//! | `loop-scroll-settle-ms` | u64 |
//! | `loop-resize-settle-ms` | u64 |
//! | `loop-lock-ms` | u64 |
//! | `loop-tolerance` | f64 |
//! | `loop-fallback-pitch` | f64 |

use core::str::FromStr;
use core::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default number of clones on each side.
pub const DEFAULT_MAX_CLONES: usize = 4;

/// Default minimum item count for looping.
pub const DEFAULT_MIN_LOOP_ITEMS: usize = 3;

/// Smallest accepted `min_loop_items`. Two or fewer originals never loop.
pub const MIN_LOOP_ITEMS_FLOOR: usize = 3;

/// Default scroll settle window.
pub const DEFAULT_SCROLL_SETTLE_MS: u64 = 100;

/// Default resize settle window.
pub const DEFAULT_RESIZE_SETTLE_MS: u64 = 250;

/// Default navigation cooldown.
pub const DEFAULT_NAVIGATION_LOCK_MS: u64 = 400;

/// Default wrap tolerance, as a fraction of one pitch.
pub const DEFAULT_WRAP_TOLERANCE: f64 = 0.3;

/// Largest accepted wrap tolerance. Half a pitch is where two wrap targets meet.
pub const MAX_WRAP_TOLERANCE: f64 = 0.5;

/// Pitch used when geometry cannot be measured.
pub const DEFAULT_FALLBACK_PITCH: f64 = 300.0;

/// Animation frames to wait before the first anchor.
pub const DEFAULT_ANCHOR_FRAMES: u32 = 2;

/// Default visible fraction that triggers a reveal.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.12;

/// Default debounce for the filter text field.
pub const DEFAULT_TEXT_DEBOUNCE_MS: u64 = 600;

pub const KEY_MAX_CLONES: &str = "loop-max-clones";
pub const KEY_SCROLL_SETTLE_MS: &str = "loop-scroll-settle-ms";
pub const KEY_RESIZE_SETTLE_MS: &str = "loop-resize-settle-ms";
pub const KEY_LOCK_MS: &str = "loop-lock-ms";
pub const KEY_TOLERANCE: &str = "loop-tolerance";
pub const KEY_FALLBACK_PITCH: &str = "loop-fallback-pitch";

/// Carousel controller tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Clones on each side, before capping at the original count.
    pub max_clones: usize,
    /// Minimum number of originals for looping; below it the controls disable.
    pub min_loop_items: usize,
    /// Quiet window after the last scroll event before reconciling.
    pub scroll_settle: Duration,
    /// Quiet window after the last resize event before re-anchoring.
    pub resize_settle: Duration,
    /// Cooldown after a navigation step during which requests are dropped.
    pub navigation_lock: Duration,
    /// Allowed overshoot past the logical window, as a fraction of one pitch.
    pub wrap_tolerance: f64,
    /// Pitch used while layout is unmeasurable.
    pub fallback_pitch: f64,
    /// Animation frames to wait before placing the initial anchor.
    pub anchor_frames: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            max_clones: DEFAULT_MAX_CLONES,
            min_loop_items: DEFAULT_MIN_LOOP_ITEMS,
            scroll_settle: Duration::from_millis(DEFAULT_SCROLL_SETTLE_MS),
            resize_settle: Duration::from_millis(DEFAULT_RESIZE_SETTLE_MS),
            navigation_lock: Duration::from_millis(DEFAULT_NAVIGATION_LOCK_MS),
            wrap_tolerance: DEFAULT_WRAP_TOLERANCE,
            fallback_pitch: DEFAULT_FALLBACK_PITCH,
            anchor_frames: DEFAULT_ANCHOR_FRAMES,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CarouselConfigDoc {
    max_clones: Option<usize>,
    min_loop_items: Option<usize>,
    scroll_settle_ms: Option<u64>,
    resize_settle_ms: Option<u64>,
    navigation_lock_ms: Option<u64>,
    wrap_tolerance: Option<f64>,
    fallback_pitch: Option<f64>,
    anchor_frames: Option<u32>,
}

impl CarouselConfig {
    /// Set the per-side clone cap.
    #[must_use]
    pub fn with_max_clones(mut self, max_clones: usize) -> Self {
        self.max_clones = max_clones;
        self
    }

    /// Set the scroll settle window.
    #[must_use]
    pub fn with_scroll_settle(mut self, settle: Duration) -> Self {
        self.scroll_settle = settle;
        self
    }

    /// Set the resize settle window.
    #[must_use]
    pub fn with_resize_settle(mut self, settle: Duration) -> Self {
        self.resize_settle = settle;
        self
    }

    /// Set the navigation cooldown.
    #[must_use]
    pub fn with_navigation_lock(mut self, lock: Duration) -> Self {
        self.navigation_lock = lock;
        self
    }

    /// Set the wrap tolerance (fraction of a pitch).
    #[must_use]
    pub fn with_wrap_tolerance(mut self, tolerance: f64) -> Self {
        self.wrap_tolerance = tolerance;
        self
    }

    /// Set the fallback pitch.
    #[must_use]
    pub fn with_fallback_pitch(mut self, pitch: f64) -> Self {
        self.fallback_pitch = pitch;
        self
    }

    /// Read overrides through `lookup`, starting from `self`.
    ///
    /// Missing keys keep their current value; present but unparsable values
    /// are reported. The result is [`validated`](Self::validated).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_override::<usize, _>(&lookup, KEY_MAX_CLONES)? {
            self.max_clones = v;
        }
        if let Some(v) = parse_override::<u64, _>(&lookup, KEY_SCROLL_SETTLE_MS)? {
            self.scroll_settle = Duration::from_millis(v);
        }
        if let Some(v) = parse_override::<u64, _>(&lookup, KEY_RESIZE_SETTLE_MS)? {
            self.resize_settle = Duration::from_millis(v);
        }
        if let Some(v) = parse_override::<u64, _>(&lookup, KEY_LOCK_MS)? {
            self.navigation_lock = Duration::from_millis(v);
        }
        if let Some(v) = parse_override::<f64, _>(&lookup, KEY_TOLERANCE)? {
            self.wrap_tolerance = v;
        }
        if let Some(v) = parse_override::<f64, _>(&lookup, KEY_FALLBACK_PITCH)? {
            self.fallback_pitch = v;
        }
        Ok(self.validated())
    }

    /// [`with_overrides`](Self::with_overrides) starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_overrides(lookup)
    }

    /// Parse a JSON document with millisecond durations.
    ///
    /// ```
    /// use loopdeck_core::config::CarouselConfig;
    ///
    /// let cfg = CarouselConfig::from_json(r#"{ "navigation_lock_ms": 600 }"#).unwrap();
    /// assert_eq!(cfg.navigation_lock.as_millis(), 600);
    /// assert_eq!(cfg.max_clones, 4);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let doc: CarouselConfigDoc = serde_json::from_str(json)?;
        let mut config = Self::default();
        if let Some(v) = doc.max_clones {
            config.max_clones = v;
        }
        if let Some(v) = doc.min_loop_items {
            config.min_loop_items = v;
        }
        if let Some(v) = doc.scroll_settle_ms {
            config.scroll_settle = Duration::from_millis(v);
        }
        if let Some(v) = doc.resize_settle_ms {
            config.resize_settle = Duration::from_millis(v);
        }
        if let Some(v) = doc.navigation_lock_ms {
            config.navigation_lock = Duration::from_millis(v);
        }
        if let Some(v) = doc.wrap_tolerance {
            config.wrap_tolerance = v;
        }
        if let Some(v) = doc.fallback_pitch {
            config.fallback_pitch = v;
        }
        if let Some(v) = doc.anchor_frames {
            config.anchor_frames = v;
        }
        Ok(config.validated())
    }

    /// Clamp every field into its valid range.
    ///
    /// Non-finite floats fall back to their defaults.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.max_clones = self.max_clones.max(1);
        self.min_loop_items = self.min_loop_items.max(MIN_LOOP_ITEMS_FLOOR);
        self.wrap_tolerance = if self.wrap_tolerance.is_finite() {
            self.wrap_tolerance.clamp(0.0, MAX_WRAP_TOLERANCE)
        } else {
            DEFAULT_WRAP_TOLERANCE
        };
        if !(self.fallback_pitch.is_finite() && self.fallback_pitch > 0.0) {
            self.fallback_pitch = DEFAULT_FALLBACK_PITCH;
        }
        self.anchor_frames = self.anchor_frames.max(1);
        self
    }

    /// Check if values are within valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.max_clones >= 1
            && self.min_loop_items >= MIN_LOOP_ITEMS_FLOOR
            && (0.0..=MAX_WRAP_TOLERANCE).contains(&self.wrap_tolerance)
            && self.fallback_pitch.is_finite()
            && self.fallback_pitch > 0.0
            && self.anchor_frames >= 1
    }
}

fn parse_override<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

/// Reveal-on-scroll collaborator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    /// Visible fraction at which an element is revealed.
    pub threshold: f64,
    /// Marker for elements that should animate in.
    pub reveal_class: String,
    /// Marker added once an element has been revealed.
    pub visible_class: String,
    /// Marker carried by carousel clones.
    pub clone_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_class: "reveal".to_owned(),
            visible_class: "is-visible".to_owned(),
            clone_class: "carousel-clone".to_owned(),
        }
    }
}

/// Filter form auto-submit settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Quiet window after the last keystroke in the text field.
    pub text_debounce: Duration,
    /// `name` attribute of the debounced text field.
    pub text_field_name: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            text_debounce: Duration::from_millis(DEFAULT_TEXT_DEBOUNCE_MS),
            text_field_name: "texto".to_owned(),
        }
    }
}

/// CSS selectors the front end binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub container: String,
    pub item: String,
    pub prev: String,
    pub next: String,
    pub filter_form: String,
    pub reveal: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            container: "#featured-carousel".to_owned(),
            item: ".project-card".to_owned(),
            prev: ".carousel-prev".to_owned(),
            next: ".carousel-next".to_owned(),
            filter_form: ".filters".to_owned(),
            reveal: ".reveal".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_page_behavior() {
        let cfg = CarouselConfig::default();
        assert_eq!(cfg.max_clones, 4);
        assert_eq!(cfg.min_loop_items, 3);
        assert_eq!(cfg.scroll_settle, Duration::from_millis(100));
        assert_eq!(cfg.resize_settle, Duration::from_millis(250));
        assert_eq!(cfg.navigation_lock, Duration::from_millis(400));
        assert_eq!(cfg.wrap_tolerance, 0.3);
        assert_eq!(cfg.fallback_pitch, 300.0);
        assert!(cfg.is_valid());
    }

    #[test]
    fn lookup_overrides_present_keys_only() {
        let cfg = CarouselConfig::from_lookup(lookup_from(&[
            (KEY_LOCK_MS, "550"),
            (KEY_TOLERANCE, " 0.25 "),
        ]))
        .unwrap();
        assert_eq!(cfg.navigation_lock, Duration::from_millis(550));
        assert_eq!(cfg.wrap_tolerance, 0.25);
        assert_eq!(cfg.scroll_settle, Duration::from_millis(100));
    }

    #[test]
    fn lookup_reports_unparsable_value() {
        let err = CarouselConfig::from_lookup(lookup_from(&[(KEY_MAX_CLONES, "lots")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, KEY_MAX_CLONES);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validated_clamps_out_of_range_values() {
        let cfg = CarouselConfig {
            max_clones: 0,
            min_loop_items: 0,
            wrap_tolerance: 3.0,
            fallback_pitch: -1.0,
            anchor_frames: 0,
            ..CarouselConfig::default()
        }
        .validated();
        assert_eq!(cfg.max_clones, 1);
        assert_eq!(cfg.min_loop_items, MIN_LOOP_ITEMS_FLOOR);
        assert_eq!(cfg.wrap_tolerance, MAX_WRAP_TOLERANCE);
        assert_eq!(cfg.fallback_pitch, DEFAULT_FALLBACK_PITCH);
        assert_eq!(cfg.anchor_frames, 1);
        assert!(cfg.is_valid());
    }

    #[test]
    fn validated_replaces_non_finite_tolerance() {
        let cfg = CarouselConfig::default()
            .with_wrap_tolerance(f64::NAN)
            .validated();
        assert_eq!(cfg.wrap_tolerance, DEFAULT_WRAP_TOLERANCE);
    }

    #[test]
    fn json_rejects_unknown_fields() {
        assert!(CarouselConfig::from_json(r#"{ "lock": 1 }"#).is_err());
    }

    #[test]
    fn json_reads_every_field() {
        let cfg = CarouselConfig::from_json(
            r#"{
                "max_clones": 2,
                "min_loop_items": 4,
                "scroll_settle_ms": 80,
                "resize_settle_ms": 300,
                "navigation_lock_ms": 500,
                "wrap_tolerance": 0.2,
                "fallback_pitch": 280.0,
                "anchor_frames": 3
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.max_clones, 2);
        assert_eq!(cfg.min_loop_items, 4);
        assert_eq!(cfg.scroll_settle, Duration::from_millis(80));
        assert_eq!(cfg.resize_settle, Duration::from_millis(300));
        assert_eq!(cfg.navigation_lock, Duration::from_millis(500));
        assert_eq!(cfg.wrap_tolerance, 0.2);
        assert_eq!(cfg.fallback_pitch, 280.0);
        assert_eq!(cfg.anchor_frames, 3);
    }

    #[test]
    fn collaborator_defaults() {
        let reveal = RevealConfig::default();
        assert_eq!(reveal.threshold, 0.12);
        assert_eq!(reveal.visible_class, "is-visible");
        let filter = FilterConfig::default();
        assert_eq!(filter.text_debounce, Duration::from_millis(600));
        assert_eq!(filter.text_field_name, "texto");
        assert_eq!(Selectors::default().item, ".project-card");
    }
}
