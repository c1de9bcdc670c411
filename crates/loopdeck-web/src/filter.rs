#![forbid(unsafe_code)]

//! Filter form auto-submit wiring.

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use loopdeck_core::filter::FilterSubmitter;
use loopdeck_core::{Clock, FilterConfig};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlFormElement, Node, Window};

use crate::clock::PerformanceClock;
use crate::error::MountError;

struct SharedState {
    submitter: FilterSubmitter,
    clock: PerformanceClock,
    timer: Option<i32>,
}

struct Shared {
    window: Window,
    form: HtmlFormElement,
    text_field: Option<Element>,
    state: RefCell<SharedState>,
    on_timer: OnceCell<Closure<dyn FnMut()>>,
}

/// Keeps one filter form wired to auto-submit.
pub(crate) struct FilterWatcher {
    shared: Rc<Shared>,
    on_input: Option<Closure<dyn FnMut()>>,
    on_change: Closure<dyn FnMut(Event)>,
}

impl FilterWatcher {
    /// Wire the first form matching `selector`; `Ok(None)` if there is none.
    pub(crate) fn watch(
        window: &Window,
        document: &Document,
        selector: &str,
        config: &FilterConfig,
    ) -> Result<Option<Self>, MountError> {
        let Some(form) = document.query_selector(selector)? else {
            return Ok(None);
        };
        let form = form
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| MountError::Js(format!("`{selector}` is not a form")))?;
        let text_field = form.query_selector(&format!("input[name='{}']", config.text_field_name))?;

        let shared = Rc::new(Shared {
            window: window.clone(),
            form,
            text_field,
            state: RefCell::new(SharedState {
                submitter: FilterSubmitter::from_config(config),
                clock: PerformanceClock::new(),
                timer: None,
            }),
            on_timer: OnceCell::new(),
        });

        let weak = Rc::downgrade(&shared);
        let _ = shared.on_timer.set(Closure::wrap(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                fire_timer(&shared);
            }
        }) as Box<dyn FnMut()>));

        let on_input = shared.text_field.as_ref().map(|field| {
            let weak = Rc::downgrade(&shared);
            let closure = Closure::wrap(Box::new(move || text_input(&weak)) as Box<dyn FnMut()>);
            add_listener(field.as_ref(), "input", closure.as_ref().unchecked_ref());
            closure
        });

        let weak = Rc::downgrade(&shared);
        let on_change = Closure::wrap(
            Box::new(move |event: Event| form_change(&weak, &event)) as Box<dyn FnMut(Event)>
        );
        add_listener(shared.form.as_ref(), "change", on_change.as_ref().unchecked_ref());

        debug!(
            debounced_field = shared.text_field.is_some(),
            "filter form mounted"
        );
        Ok(Some(Self {
            shared,
            on_input,
            on_change,
        }))
    }
}

impl Drop for FilterWatcher {
    fn drop(&mut self) {
        if let (Some(field), Some(closure)) = (&self.shared.text_field, &self.on_input) {
            let target: &EventTarget = field.as_ref();
            let _ = target
                .remove_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        }
        let form: &EventTarget = self.shared.form.as_ref();
        let _ = form
            .remove_event_listener_with_callback("change", self.on_change.as_ref().unchecked_ref());
        if let Ok(mut state) = self.shared.state.try_borrow_mut() {
            clear_timer(&self.shared.window, &mut state);
        }
    }
}

fn add_listener(target: &EventTarget, event: &str, callback: &js_sys::Function) {
    if let Err(err) = target.add_event_listener_with_callback(event, callback) {
        warn!(?err, event, "failed to add filter listener");
    }
}

fn clear_timer(window: &Window, state: &mut SharedState) {
    if let Some(handle) = state.timer.take() {
        window.clear_timeout_with_handle(handle);
    }
}

fn arm_timer(shared: &Shared, state: &mut SharedState) {
    clear_timer(&shared.window, state);
    let (Some(due), Some(cb)) = (state.submitter.deadline(), shared.on_timer.get()) else {
        return;
    };
    let delay = due.saturating_sub(state.clock.now_mono());
    let ms = (delay.as_secs_f64() * 1000.0).ceil().min(f64::from(i32::MAX)) as i32;
    match shared
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)
    {
        Ok(handle) => state.timer = Some(handle),
        Err(err) => warn!(?err, "setTimeout failed"),
    }
}

fn submit(form: &HtmlFormElement) {
    debug!("filter form submitted");
    if let Err(err) = form.submit() {
        warn!(?err, "filter form submit failed");
    }
}

fn text_input(weak: &Weak<Shared>) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut state) = shared.state.try_borrow_mut() else {
        return;
    };
    let now = state.clock.now_mono();
    state.submitter.on_text_input(now);
    arm_timer(&shared, &mut state);
}

fn form_change(weak: &Weak<Shared>, event: &Event) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let from_text_field = match (&shared.text_field, event.target()) {
        (Some(field), Some(target)) => {
            let field: &Node = field.as_ref();
            field.is_same_node(target.dyn_ref::<Node>())
        }
        _ => false,
    };
    let submit_now = {
        let Ok(mut state) = shared.state.try_borrow_mut() else {
            return;
        };
        let submit_now = state.submitter.on_change(from_text_field);
        if submit_now {
            clear_timer(&shared.window, &mut state);
        }
        submit_now
    };
    if submit_now {
        submit(&shared.form);
    }
}

fn fire_timer(shared: &Shared) {
    let due = {
        let Ok(mut state) = shared.state.try_borrow_mut() else {
            return;
        };
        state.timer = None;
        let now = state.clock.now_mono();
        let due = state.submitter.poll(now);
        if !due {
            // Fired a hair early; re-arm for the remainder.
            arm_timer(shared, &mut state);
        }
        due
    };
    if due {
        submit(&shared.form);
    }
}
