#![forbid(unsafe_code)]

//! `wasm-bindgen` exports.

use std::cell::RefCell;

use js_sys::{Object, Reflect};
use loopdeck_core::CarouselConfig;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::logging;
use crate::page::{MountSummary, PageOptions, mount_all};

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let global = js_sys::global();
            if let Ok(console) = Reflect::get(&global, &"console".into())
                && let Ok(error) = Reflect::get(&console, &"error".into())
                && let Ok(f) = error.dyn_into::<js_sys::Function>()
            {
                let _ = f.call1(&console, &JsValue::from_str(&format!("{info}")));
            }
        }));
    });
}

fn summary_to_js(summary: &MountSummary, deferred: bool) -> JsValue {
    let obj = Object::new();
    set_js(&obj, "carousels", JsValue::from_f64(summary.carousels as f64));
    set_js(&obj, "disabled", JsValue::from_f64(summary.disabled as f64));
    set_js(
        &obj,
        "revealTargets",
        JsValue::from_f64(summary.reveal_targets as f64),
    );
    set_js(&obj, "filter", JsValue::from_bool(summary.filter));
    set_js(&obj, "deferred", JsValue::from_bool(deferred));
    obj.into()
}

fn options_from(config_json: Option<&str>) -> PageOptions {
    let carousel = match config_json.map(CarouselConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            warn!(%err, "ignoring carousel config");
            CarouselConfig::default()
        }
        None => CarouselConfig::default(),
    };
    PageOptions {
        carousel,
        ..PageOptions::default()
    }
}

fn mount(options: &PageOptions) -> MountSummary {
    mount_all(options).unwrap_or_else(|err| {
        warn!(%err, "page not mounted");
        MountSummary::default()
    })
}

thread_local! {
    static READY_HOOK: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
}

/// Mount every loopdeck widget on the page.
///
/// `log_filter` is an `EnvFilter` directive (default `info`); `config_json`
/// overrides carousel defaults, e.g. `{"navigation_lock_ms": 500}`.
///
/// While the document is still loading, mounting is deferred to
/// `DOMContentLoaded` and the returned summary has `deferred: true`.
#[wasm_bindgen]
pub fn boot(log_filter: Option<String>, config_json: Option<String>) -> JsValue {
    install_panic_hook();
    logging::install(log_filter.as_deref());
    let options = options_from(config_json.as_deref());

    let loading = web_sys::window()
        .and_then(|w| w.document())
        .filter(|d| d.ready_state() == "loading");
    let Some(document) = loading else {
        return summary_to_js(&mount(&options), false);
    };

    debug!("deferring mount to DOMContentLoaded");
    let hook: Closure<dyn FnMut()> = Closure::once(move || {
        mount(&options);
    });
    if let Err(err) =
        document.add_event_listener_with_callback("DOMContentLoaded", hook.as_ref().unchecked_ref())
    {
        warn!(?err, "failed to defer mount");
    }
    READY_HOOK.with(|slot| *slot.borrow_mut() = Some(hook));
    summary_to_js(&MountSummary::default(), true)
}
