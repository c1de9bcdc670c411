#![forbid(unsafe_code)]

//! [`ScrollHost`] over a live scroll container.

use js_sys::Reflect;
use loopdeck_core::ScrollHost;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions};

const SCROLL_LEFT: &str = "scrollLeft";

/// Scroll container plus the selector of its items.
///
/// `scrollLeft` is read and written through `Reflect` because the typed
/// bindings truncate it to an integer and browsers keep fractional offsets.
#[derive(Debug, Clone)]
pub(crate) struct DomScrollHost {
    container: HtmlElement,
    item_selector: String,
}

impl DomScrollHost {
    pub(crate) fn new(container: HtmlElement, item_selector: impl Into<String>) -> Self {
        Self {
            container,
            item_selector: item_selector.into(),
        }
    }

    fn item_left(&self, index: u32) -> Option<f64> {
        let items = self.container.query_selector_all(&self.item_selector).ok()?;
        let item = items.get(index)?.dyn_into::<Element>().ok()?;
        Some(item.get_bounding_client_rect().left())
    }
}

impl ScrollHost for DomScrollHost {
    fn leading_edges(&self) -> Option<(f64, f64)> {
        Some((self.item_left(0)?, self.item_left(1)?))
    }

    fn scroll_offset(&self) -> f64 {
        Reflect::get(&self.container, &JsValue::from_str(SCROLL_LEFT))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        match Reflect::set(
            &self.container,
            &JsValue::from_str(SCROLL_LEFT),
            &JsValue::from_f64(offset),
        ) {
            Ok(true) => {}
            Ok(false) => warn!(offset, "scrollLeft write rejected"),
            Err(err) => warn!(?err, offset, "failed to set scrollLeft"),
        }
    }

    fn scroll_by_animated(&mut self, delta: f64) {
        let options = ScrollToOptions::new();
        options.set_left(delta);
        options.set_behavior(ScrollBehavior::Smooth);
        self.container.scroll_by_with_scroll_to_options(&options);
    }

    fn set_smooth_scrolling(&mut self, smooth: bool) {
        let value = if smooth { "smooth" } else { "auto" };
        if let Err(err) = self.container.style().set_property("scroll-behavior", value) {
            warn!(?err, value, "failed to set scroll-behavior");
        }
    }
}
