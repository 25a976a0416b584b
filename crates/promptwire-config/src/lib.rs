#![allow(clippy::must_use_candidate)]

pub mod capture;
mod env;
mod loader;
pub mod telemetry;
pub mod upload;

use serde::Deserialize;

pub use capture::*;
pub use telemetry::TelemetryConfig;
pub use upload::*;

/// Top-level promptwire configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Message content capture
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Reference-mode storage destination
    #[serde(default)]
    pub upload: UploadConfig,
    /// Logging and instrumentation scope
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
