#![forbid(unsafe_code)]

//! Mount errors.
//!
//! None of these reach the page: the mount entry points log them and leave
//! the affected widget unmounted.

use loopdeck_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("carousel trigger `{0}` not found")]
    MissingTrigger(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for MountError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl MountError {
    /// Expected absences on pages that simply don't carry the widget.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::MissingTrigger(_))
    }
}
