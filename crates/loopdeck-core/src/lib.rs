#![forbid(unsafe_code)]

//! Core: the looping carousel controller and its page collaborators.
//!
//! # Role in loopdeck
//! `loopdeck-core` owns every decision the page behavior layer makes. It never
//! touches the DOM and never reads the wall clock; the browser front end
//! (`loopdeck-web`) measures layout, forwards events with explicit timestamps,
//! and performs the scroll writes this crate asks for.
//!
//! # Primary responsibilities
//! - **Sequence**: the padded `[tail clones, originals, head clones]` layout.
//! - **Geometry**: pitch measurement and the logical window.
//! - **Reconciliation**: silent wrap-around after a scroll burst settles.
//! - **Navigation**: one animated step at a time behind a cooldown lock.
//! - **Carousel**: the controller tying the above to host callbacks.
//! - **Reveal / Filter**: the policies behind reveal-on-scroll and filter
//!   form auto-submit.
//!
//! # Driving model
//!
//! ```
//! use core::time::Duration;
//! use loopdeck_core::carousel::Carousel;
//! use loopdeck_core::config::CarouselConfig;
//! use loopdeck_core::host::RecordingHost;
//!
//! let mut host = RecordingHost::new(13, 300.0);
//! let mut carousel = Carousel::new(5, CarouselConfig::default());
//!
//! // Two animation frames after mount the controller anchors on the first original.
//! carousel.on_animation_frame(&mut host);
//! carousel.on_animation_frame(&mut host);
//! assert_eq!(host.offset(), 1200.0);
//!
//! carousel.go_next(&mut host, Duration::ZERO);
//! assert_eq!(host.offset(), 1500.0);
//! ```

pub mod carousel;
pub mod clock;
pub mod config;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod host;
pub mod navigation;
pub mod reconcile;
pub mod reveal;
pub mod sequence;
pub mod timer;

pub use carousel::{Carousel, Mode, TickReport};
pub use clock::{Clock, DeterministicClock};
pub use config::{CarouselConfig, FilterConfig, RevealConfig, Selectors};
pub use error::ConfigError;
pub use host::{HostOp, RecordingHost, ScrollHost};
pub use navigation::{Direction, NavOutcome};
pub use reconcile::Correction;
pub use sequence::{Role, Sequence, Slot};
