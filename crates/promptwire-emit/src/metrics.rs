use std::time::Duration;

use opentelemetry::KeyValue;
use promptwire_telemetry::metrics::{GenAiMetrics, TOKEN_TYPE_INPUT, TOKEN_TYPE_OUTPUT};

/// Measurements taken for one model call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationUsage {
    /// Wall time of the call
    pub duration: Duration,
    /// Prompt tokens, when the provider reported them
    pub input_tokens: Option<u64>,
    /// Completion tokens, when the provider reported them
    pub output_tokens: Option<u64>,
}

/// Destination for per-call measurements
pub trait MetricsSink: Send + Sync {
    /// Record one call's measurements
    fn record_operation(&self, usage: &OperationUsage, attributes: &[KeyValue]);
}

impl MetricsSink for GenAiMetrics {
    fn record_operation(&self, usage: &OperationUsage, attributes: &[KeyValue]) {
        self.record_operation_duration(usage.duration.as_secs_f64(), attributes);

        if let Some(tokens) = usage.input_tokens {
            self.record_token_usage(tokens, TOKEN_TYPE_INPUT, attributes);
        }
        if let Some(tokens) = usage.output_tokens {
            self.record_token_usage(tokens, TOKEN_TYPE_OUTPUT, attributes);
        }
    }
}
