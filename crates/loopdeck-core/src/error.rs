#![forbid(unsafe_code)]

//! Configuration errors.
//!
//! Nothing at the page surface throws; the browser front end logs these and
//! leaves the affected widget unmounted.

use thiserror::Error;

/// Failure to read a configuration override.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An override was present but could not be parsed.
    #[error("invalid value {value:?} for `{key}`")]
    InvalidValue {
        /// Lookup key, e.g. `loop-lock-ms`.
        key: &'static str,
        /// Raw value as supplied by the host.
        value: String,
    },

    /// A JSON document did not match the config schema.
    #[error("malformed config json: {0}")]
    Json(#[from] serde_json::Error),
}
