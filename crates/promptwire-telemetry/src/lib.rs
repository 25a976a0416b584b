//! Logging bootstrap and GenAI client metrics for Promptwire
//!
//! Installs the `tracing` subscriber and exposes the OpenTelemetry histograms
//! recorded for every completion.

#![allow(clippy::must_use_candidate)]

pub mod metrics;

use opentelemetry::InstrumentationScope;
use promptwire_config::TelemetryConfig;

// Re-export common OpenTelemetry types for metrics
pub use opentelemetry::{
    KeyValue,
    metrics::{Histogram, Meter},
};

/// Initialize logging from configuration
///
/// `RUST_LOG` wins when set, then `telemetry.log_filter`, then
/// `default_filter`. Output is human-readable unless `json_logs` is on.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let directive = config
        .and_then(|c| c.log_filter.as_deref())
        .unwrap_or(default_filter);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = config.is_some_and(|c| c.json_logs);

    let fmt_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    });

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}

/// Instrumentation scope for events and metrics emitted by this library
pub fn instrumentation_scope(config: Option<&TelemetryConfig>) -> InstrumentationScope {
    let name = config.map_or_else(|| TelemetryConfig::default().scope_name, |c| c.scope_name.clone());

    InstrumentationScope::builder(name)
        .with_version(env!("CARGO_PKG_VERSION"))
        .build()
}
