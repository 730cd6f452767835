//! Configuration for faultgate
//!
//! Reads the `[error_handling]` and `[logging]` sections from TOML, expands
//! `{{ env.VAR }}` placeholders, and validates the result once at startup.

#![allow(clippy::must_use_candidate)]

pub mod error_handling;
mod env;
mod loader;
pub mod logging;

use serde::Deserialize;

pub use error_handling::*;
pub use logging::*;

/// Top-level faultgate configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fault to status translation
    #[serde(default)]
    pub error_handling: ErrorHandlingConfig,
    /// Logging sinks and thresholds
    #[serde(default)]
    pub logging: LoggingOptions,
}
