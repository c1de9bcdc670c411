#![forbid(unsafe_code)]

//! Page-level mounting.
//!
//! Mounted widgets are kept alive in a thread-local registry for the life of
//! the page; their closures are what the browser calls back into.

use std::cell::RefCell;

use loopdeck_core::{Carousel, CarouselConfig, FilterConfig, Mode, RevealConfig, Selectors};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, Window};

use crate::dom::DomScrollHost;
use crate::driver::{CarouselDriver, DriverTargets};
use crate::error::MountError;
use crate::filter::FilterWatcher;
use crate::markers::CloneMarkers;
use crate::mount::{items, mount_clones, strip_text_nodes};
use crate::reveal::RevealWatcher;

/// Everything the page layer can be configured with.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    pub selectors: Selectors,
    /// Base carousel config; each container may override it through
    /// `data-loop-*` attributes.
    pub carousel: CarouselConfig,
    pub reveal: RevealConfig,
    pub filter: FilterConfig,
}

/// What [`mount_all`] wired up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountSummary {
    /// Containers now looping.
    pub carousels: usize,
    /// Containers with too few items; their triggers were disabled.
    pub disabled: usize,
    /// Elements observed for reveal.
    pub reveal_targets: usize,
    /// Whether a filter form was wired.
    pub filter: bool,
}

#[derive(Default)]
struct Registry {
    carousels: Vec<CarouselDriver>,
    reveal: Option<RevealWatcher>,
    filter: Option<FilterWatcher>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

fn window() -> Result<Window, MountError> {
    web_sys::window().ok_or(MountError::NoWindow)
}

fn document(window: &Window) -> Result<Document, MountError> {
    window.document().ok_or(MountError::NoDocument)
}

/// `data-*` attribute holding the override for config `key`.
fn data_attribute(key: &str) -> String {
    format!("data-{key}")
}

/// First match of `selector` near `container`: its parent first, then the
/// whole document.
fn find_trigger(
    document: &Document,
    container: &Element,
    selector: &str,
) -> Result<Element, MountError> {
    let local = container
        .parent_element()
        .and_then(|parent| parent.query_selector(selector).ok().flatten());
    match local {
        Some(found) => Ok(found),
        None => document
            .query_selector(selector)?
            .ok_or_else(|| MountError::MissingTrigger(selector.to_owned())),
    }
}

fn disable(trigger: &Element) {
    if let Some(button) = trigger.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(true);
    } else {
        let _ = trigger.set_attribute("disabled", "");
    }
}

/// Mount one carousel container.
///
/// Strips whitespace text nodes, counts the original items, then either
/// leaves the container alone (no items), disables its triggers (too few to
/// loop), or mounts clones and wires a driver.
pub fn mount_carousel(container: &Element, options: &PageOptions) -> Result<Mode, MountError> {
    let window = window()?;
    let document = document(&window)?;
    let selectors = &options.selectors;

    let prev = find_trigger(&document, container, &selectors.prev)?;
    let next = find_trigger(&document, container, &selectors.next)?;

    strip_text_nodes(container)?;
    let originals = items(container, &selectors.item)?;
    let config = options
        .carousel
        .clone()
        .with_overrides(|key| container.get_attribute(&data_attribute(key)))?;
    let carousel = Carousel::new(originals.len(), config);

    match carousel.mode() {
        Mode::Inert => {
            debug!(container = %selectors.container, "carousel has no items");
            return Ok(Mode::Inert);
        }
        Mode::Disabled => {
            disable(&prev);
            disable(&next);
            return Ok(Mode::Disabled);
        }
        Mode::Looping => {}
    }

    let markers = CloneMarkers::new(&options.reveal);
    mount_clones(container, &originals, carousel.sequence(), &markers)?;

    let html = container
        .clone()
        .dyn_into::<HtmlElement>()
        .map_err(|_| MountError::Js("carousel container is not an HTML element".into()))?;
    let host = DomScrollHost::new(html, selectors.item.clone());
    let driver = CarouselDriver::attach(
        &window,
        carousel,
        host,
        DriverTargets {
            container: container.as_ref(),
            prev: prev.as_ref(),
            next: next.as_ref(),
        },
    );
    REGISTRY.with(|r| r.borrow_mut().carousels.push(driver));
    Ok(Mode::Looping)
}

/// Mount every carousel, the reveal observer and the filter form.
///
/// Per-widget failures are logged and skipped; only a missing window or
/// document is an error.
pub fn mount_all(options: &PageOptions) -> Result<MountSummary, MountError> {
    let window = window()?;
    let document = document(&window)?;
    let mut summary = MountSummary::default();

    // Carousels go first so reveal never picks up their clones.
    let containers = match document.document_element() {
        Some(root) => items(&root, &options.selectors.container)?,
        None => Vec::new(),
    };
    if containers.is_empty() {
        debug!(selector = %options.selectors.container, "no carousel on page");
    }
    for container in &containers {
        match mount_carousel(container, options) {
            Ok(Mode::Looping) => summary.carousels += 1,
            Ok(Mode::Disabled) => summary.disabled += 1,
            Ok(Mode::Inert) => {}
            Err(err) if err.is_absent() => debug!(%err, "carousel not mounted"),
            Err(err) => warn!(%err, "carousel not mounted"),
        }
    }

    match RevealWatcher::watch(&document, &options.selectors.reveal, &options.reveal) {
        Ok(Some(watcher)) => {
            summary.reveal_targets = watcher.observed();
            REGISTRY.with(|r| r.borrow_mut().reveal = Some(watcher));
        }
        Ok(None) => {}
        Err(err) => warn!(%err, "reveal observer not mounted"),
    }

    match FilterWatcher::watch(
        &window,
        &document,
        &options.selectors.filter_form,
        &options.filter,
    ) {
        Ok(Some(watcher)) => {
            summary.filter = true;
            REGISTRY.with(|r| r.borrow_mut().filter = Some(watcher));
        }
        Ok(None) => {}
        Err(err) => warn!(%err, "filter form not mounted"),
    }

    info!(
        carousels = summary.carousels,
        disabled = summary.disabled,
        reveal_targets = summary.reveal_targets,
        filter = summary.filter,
        "page mounted"
    );
    Ok(summary)
}
