//! Error type shared by the selector, session and wasm layers.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomizerError {
    #[error("Minimum value ({min}) cannot be greater than maximum value ({max})")]
    RangeInvalid { min: i64, max: i64 },
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
}
