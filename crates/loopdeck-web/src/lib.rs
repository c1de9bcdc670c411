#![forbid(unsafe_code)]

//! Browser front end for loopdeck.
//!
//! # Role in loopdeck
//! `loopdeck-web` is the only crate that touches the DOM. It measures layout,
//! forwards browser events with monotonic timestamps, and performs the scroll
//! writes the `loopdeck-core` controllers ask for. All timing and wrap logic
//! lives in the core crate.
//!
//! # Mounting
//! JavaScript calls the exported `boot(logFilter, configJson)` once per page.
//! It installs logging and a panic hook, then (on `DOMContentLoaded` if the
//! document is still loading) mounts:
//!
//! 1. every carousel container, padding it with clones and wiring its
//!    prev/next triggers,
//! 2. reveal-on-scroll for elements tagged for it,
//! 3. filter form auto-submit.
//!
//! Every failure degrades to "not mounted": nothing is ever thrown to the page.
//!
//! Non-wasm builds expose only the DOM-free pieces ([`MountError`],
//! [`CloneMarkers`], [`PerformanceClock`]) so they can be unit-tested natively.

pub mod clock;
pub mod error;
pub mod markers;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod driver;
#[cfg(target_arch = "wasm32")]
mod filter;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod mount;
#[cfg(target_arch = "wasm32")]
pub mod page;
#[cfg(target_arch = "wasm32")]
mod reveal;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use clock::PerformanceClock;
pub use error::MountError;
pub use markers::CloneMarkers;

#[cfg(target_arch = "wasm32")]
pub use page::{MountSummary, PageOptions, mount_all, mount_carousel};
