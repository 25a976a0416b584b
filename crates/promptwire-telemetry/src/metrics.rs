//! Metric name constants and recording helpers

use std::fmt;

use opentelemetry::metrics::{Histogram, Meter};
use opentelemetry::{InstrumentationScope, KeyValue, global};
use promptwire_core::attributes::GEN_AI_TOKEN_TYPE;

// GenAI client metric names
pub const GEN_AI_CLIENT_OPERATION_DURATION: &str = "gen_ai.client.operation.duration";
pub const GEN_AI_CLIENT_TOKEN_USAGE: &str = "gen_ai.client.token.usage";

// `gen_ai.token.type` values
pub const TOKEN_TYPE_INPUT: &str = "input";
pub const TOKEN_TYPE_OUTPUT: &str = "output";

// Advisory bucket boundaries from the GenAI semantic conventions
const DURATION_BOUNDARIES: [f64; 14] = [
    0.01, 0.02, 0.04, 0.08, 0.16, 0.32, 0.64, 1.28, 2.56, 5.12, 10.24, 20.48, 40.96, 81.92,
];
const TOKEN_BOUNDARIES: [f64; 14] = [
    1.0,
    4.0,
    16.0,
    64.0,
    256.0,
    1_024.0,
    4_096.0,
    16_384.0,
    65_536.0,
    262_144.0,
    1_048_576.0,
    4_194_304.0,
    16_777_216.0,
    67_108_864.0,
];

/// Histograms recorded for every model call
#[derive(Clone)]
pub struct GenAiMetrics {
    operation_duration: Histogram<f64>,
    token_usage: Histogram<u64>,
}

impl GenAiMetrics {
    /// Build the instruments on the given meter
    pub fn new(meter: &Meter) -> Self {
        let operation_duration = meter
            .f64_histogram(GEN_AI_CLIENT_OPERATION_DURATION)
            .with_unit("s")
            .with_description("GenAI operation duration")
            .with_boundaries(DURATION_BOUNDARIES.to_vec())
            .build();

        let token_usage = meter
            .u64_histogram(GEN_AI_CLIENT_TOKEN_USAGE)
            .with_unit("{token}")
            .with_description("Measures number of input and output tokens used")
            .with_boundaries(TOKEN_BOUNDARIES.to_vec())
            .build();

        Self {
            operation_duration,
            token_usage,
        }
    }

    /// Build the instruments on the global meter provider
    pub fn from_global(scope: InstrumentationScope) -> Self {
        Self::new(&global::meter_with_scope(scope))
    }

    /// Record the duration of one operation, in seconds
    pub fn record_operation_duration(&self, seconds: f64, attributes: &[KeyValue]) {
        self.operation_duration.record(seconds, attributes);
    }

    /// Record a token count tagged with its `gen_ai.token.type`
    pub fn record_token_usage(&self, tokens: u64, token_type: &'static str, attributes: &[KeyValue]) {
        let mut tagged = Vec::with_capacity(attributes.len() + 1);
        tagged.extend_from_slice(attributes);
        tagged.push(KeyValue::new(GEN_AI_TOKEN_TYPE, token_type));
        self.token_usage.record(tokens, &tagged);
    }
}

impl fmt::Debug for GenAiMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenAiMetrics").finish_non_exhaustive()
    }
}
