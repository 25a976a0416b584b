use serde::Deserialize;

/// Logging and instrumentation scope configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Instrumentation scope name for events and metrics
    #[serde(default = "default_scope_name")]
    pub scope_name: String,
    /// `tracing` filter directive, used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            scope_name: default_scope_name(),
            log_filter: None,
            json_logs: false,
        }
    }
}

fn default_scope_name() -> String {
    "promptwire".to_owned()
}
