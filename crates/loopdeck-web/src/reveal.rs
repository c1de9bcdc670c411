#![forbid(unsafe_code)]

//! Reveal-on-scroll over `IntersectionObserver`.

use js_sys::Array;
use loopdeck_core::RevealConfig;
use loopdeck_core::reveal::{RevealDecision, RevealEntry, RevealPolicy};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::error::MountError;
use crate::markers::CloneMarkers;
use crate::mount::items;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// One observer for every element tagged for reveal.
pub(crate) struct RevealWatcher {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
    observed: usize,
}

impl RevealWatcher {
    /// Observe every non-clone element matching `selector`.
    ///
    /// `Ok(None)` when nothing on the page is tagged.
    pub(crate) fn watch(
        document: &Document,
        selector: &str,
        config: &RevealConfig,
    ) -> Result<Option<Self>, MountError> {
        let Some(root) = document.document_element() else {
            return Err(MountError::NoDocument);
        };
        let targets = items(&root, selector)?;
        if targets.is_empty() {
            return Ok(None);
        }

        let policy = RevealPolicy::new(config);
        let markers = CloneMarkers::new(config);
        let observable: Vec<&Element> = targets
            .iter()
            .filter(|t| policy.should_observe(markers.is_clone(&t.class_name())))
            .collect();

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(policy.threshold()));
        let visible = config.visible_class.clone();
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    handle_entry(&policy, &visible, &observer, &entry);
                }
            },
        )
            as Box<dyn FnMut(Array, IntersectionObserver)>);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        for target in &observable {
            observer.observe(target);
        }
        let observed = observable.len();
        debug!(observed, "reveal observer mounted");
        Ok(Some(Self {
            observer,
            _callback: callback,
            observed,
        }))
    }

    pub(crate) const fn observed(&self) -> usize {
        self.observed
    }
}

impl Drop for RevealWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn handle_entry(
    policy: &RevealPolicy,
    visible: &str,
    observer: &IntersectionObserver,
    entry: &IntersectionObserverEntry,
) {
    let target: Element = entry.target();
    let classes = target.class_list();
    let decision = policy.decide(RevealEntry {
        is_intersecting: entry.is_intersecting(),
        ratio: entry.intersection_ratio(),
        already_revealed: classes.contains(visible),
    });
    match decision {
        RevealDecision::Ignore => {}
        RevealDecision::Reveal => {
            if let Err(err) = classes.add_1(visible) {
                warn!(?err, "failed to mark element visible");
            }
            observer.unobserve(&target);
        }
        RevealDecision::Forget => observer.unobserve(&target),
    }
}
