#![forbid(unsafe_code)]

//! Event wiring for one mounted carousel.
//!
//! The driver forwards browser events into a [`Carousel`] with timestamps
//! from a [`PerformanceClock`], then re-arms scheduling:
//!
//! - at most one `setTimeout`, due at [`Carousel::next_deadline`],
//! - at most one pending `requestAnimationFrame` while
//!   [`Carousel::wants_animation_frame`] holds.
//!
//! Callbacks hold a `Weak` to the shared state so dropping the driver tears
//! everything down.

use core::time::Duration;
use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use loopdeck_core::{Carousel, Clock};
use tracing::{trace, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{EventTarget, Window};

use crate::clock::PerformanceClock;
use crate::dom::DomScrollHost;

struct SharedState {
    carousel: Carousel,
    host: DomScrollHost,
    clock: PerformanceClock,
    timer: Option<i32>,
    timer_due: Option<Duration>,
    frame_pending: bool,
}

struct Shared {
    window: Window,
    state: RefCell<SharedState>,
    on_timer: OnceCell<Closure<dyn FnMut()>>,
    on_frame: OnceCell<Closure<dyn FnMut(f64)>>,
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut()>,
}

/// Inputs a driver binds to.
pub(crate) struct DriverTargets<'a> {
    pub container: &'a EventTarget,
    pub prev: &'a EventTarget,
    pub next: &'a EventTarget,
}

/// Keeps one looping carousel wired to the page.
pub(crate) struct CarouselDriver {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

impl CarouselDriver {
    pub(crate) fn attach(
        window: &Window,
        carousel: Carousel,
        host: DomScrollHost,
        targets: DriverTargets<'_>,
    ) -> Self {
        let shared = Rc::new(Shared {
            window: window.clone(),
            state: RefCell::new(SharedState {
                carousel,
                host,
                clock: PerformanceClock::new(),
                timer: None,
                timer_due: None,
                frame_pending: false,
            }),
            on_timer: OnceCell::new(),
            on_frame: OnceCell::new(),
        });

        let weak = Rc::downgrade(&shared);
        let _ = shared.on_timer.set(Closure::wrap(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                fire_timer(&shared);
            }
        }) as Box<dyn FnMut()>));

        let weak = Rc::downgrade(&shared);
        let _ = shared.on_frame.set(Closure::wrap(Box::new(move |_ts: f64| {
            if let Some(shared) = weak.upgrade() {
                fire_frame(&shared);
            }
        }) as Box<dyn FnMut(f64)>));

        let listeners = vec![
            listen(targets.container, "scroll", &shared, |state, now| {
                state.carousel.on_scroll(now);
            }),
            listen(window.as_ref(), "resize", &shared, |state, now| {
                state.carousel.on_resize(now);
            }),
            listen(targets.prev, "click", &shared, |state, now| {
                let SharedState { carousel, host, .. } = state;
                let _ = carousel.go_previous(host, now);
            }),
            listen(targets.next, "click", &shared, |state, now| {
                let SharedState { carousel, host, .. } = state;
                let _ = carousel.go_next(host, now);
            }),
        ];

        schedule(&shared);
        Self { shared, listeners }
    }
}

impl Drop for CarouselDriver {
    fn drop(&mut self) {
        for l in &self.listeners {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.event, l.closure.as_ref().unchecked_ref());
        }
        if let Ok(mut state) = self.shared.state.try_borrow_mut()
            && let Some(handle) = state.timer.take()
        {
            self.shared.window.clear_timeout_with_handle(handle);
        }
    }
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    shared: &Rc<Shared>,
    handler: fn(&mut SharedState, Duration),
) -> Listener {
    let weak: Weak<Shared> = Rc::downgrade(shared);
    let closure = Closure::wrap(Box::new(move || dispatch(&weak, handler)) as Box<dyn FnMut()>);
    if let Err(err) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        warn!(?err, event, "failed to add carousel listener");
    }
    Listener {
        target: target.clone(),
        event,
        closure,
    }
}

fn dispatch(weak: &Weak<Shared>, handler: fn(&mut SharedState, Duration)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    {
        let Ok(mut state) = shared.state.try_borrow_mut() else {
            trace!("carousel busy, event dropped");
            return;
        };
        let now = state.clock.now_mono();
        handler(&mut state, now);
    }
    schedule(&shared);
}

fn fire_timer(shared: &Shared) {
    {
        let Ok(mut state) = shared.state.try_borrow_mut() else {
            return;
        };
        state.timer = None;
        state.timer_due = None;
        let now = state.clock.now_mono();
        let SharedState { carousel, host, .. } = &mut *state;
        let report = carousel.tick(host, now);
        if !report.is_idle() {
            trace!(?report, "carousel tick");
        }
    }
    schedule(shared);
}

fn fire_frame(shared: &Shared) {
    {
        let Ok(mut state) = shared.state.try_borrow_mut() else {
            return;
        };
        state.frame_pending = false;
        let SharedState { carousel, host, .. } = &mut *state;
        carousel.on_animation_frame(host);
    }
    schedule(shared);
}

/// Milliseconds for `setTimeout`, rounded up so the timer never fires early.
fn timeout_ms(delay: Duration) -> i32 {
    (delay.as_secs_f64() * 1000.0).ceil().min(f64::from(i32::MAX)) as i32
}

fn schedule(shared: &Shared) {
    let Ok(mut state) = shared.state.try_borrow_mut() else {
        return;
    };

    if state.carousel.wants_animation_frame()
        && !state.frame_pending
        && let Some(cb) = shared.on_frame.get()
    {
        match shared.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(_) => state.frame_pending = true,
            Err(err) => warn!(?err, "requestAnimationFrame failed"),
        }
    }

    let due = state.carousel.next_deadline();
    if due == state.timer_due {
        return;
    }
    if let Some(handle) = state.timer.take() {
        shared.window.clear_timeout_with_handle(handle);
    }
    state.timer_due = None;

    let (Some(due), Some(cb)) = (due, shared.on_timer.get()) else {
        return;
    };
    let delay = due.saturating_sub(state.clock.now_mono());
    match shared
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            timeout_ms(delay),
        ) {
        Ok(handle) => {
            state.timer = Some(handle);
            state.timer_due = Some(due);
        }
        Err(err) => warn!(?err, "setTimeout failed"),
    }
}
