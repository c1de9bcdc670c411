#![forbid(unsafe_code)]

//! Filter form auto-submit policy.
//!
//! Typing in the designated text field submits after a quiet window; a change
//! to any other field submits immediately. The browser also fires `change` on
//! the text field when it loses focus, which is ignored so the debounce stays
//! the only path for text.

use core::time::Duration;

use tracing::trace;

use crate::config::FilterConfig;
use crate::timer::Debounce;

#[derive(Debug, Clone)]
pub struct FilterSubmitter {
    text: Debounce,
}

impl FilterSubmitter {
    #[must_use]
    pub const fn new(text_debounce: Duration) -> Self {
        Self {
            text: Debounce::new(text_debounce),
        }
    }

    #[must_use]
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.text_debounce)
    }

    /// Keystroke in the text field.
    pub fn on_text_input(&mut self, now: Duration) {
        self.text.restart(now);
    }

    /// `change` event on the form. Returns `true` if the form should submit now.
    pub fn on_change(&mut self, from_text_field: bool) -> bool {
        if from_text_field {
            trace!("change from text field left to the debounce");
            return false;
        }
        self.text.cancel();
        true
    }

    /// Timer callback. Returns `true` once when the text debounce fires.
    pub fn poll(&mut self, now: Duration) -> bool {
        self.text.fire(now)
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.text.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn typing_submits_after_quiet_window() {
        let mut f = FilterSubmitter::from_config(&FilterConfig::default());
        f.on_text_input(ms(0));
        f.on_text_input(ms(200));
        f.on_text_input(ms(450));
        assert!(!f.poll(ms(600)));
        assert!(!f.poll(ms(1049)));
        assert!(f.poll(ms(1050)));
        assert!(!f.poll(ms(2000)));
    }

    #[test]
    fn other_fields_submit_immediately_and_cancel_pending_text() {
        let mut f = FilterSubmitter::new(ms(600));
        f.on_text_input(ms(0));
        assert!(f.on_change(false));
        assert_eq!(f.deadline(), None);
        assert!(!f.poll(ms(600)));
    }

    #[test]
    fn text_field_change_is_ignored() {
        let mut f = FilterSubmitter::new(ms(600));
        f.on_text_input(ms(0));
        assert!(!f.on_change(true));
        assert!(f.poll(ms(600)));
    }
}
