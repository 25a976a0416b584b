//! GenAI telemetry emission
//!
//! Turns normalized messages into `gen_ai.*` events, inline or by reference,
//! applies the content capture policy and records per-call metrics.

#![allow(clippy::must_use_candidate)]

mod emitter;
pub mod event;
pub mod metrics;

pub use emitter::{CaptureSettings, CompletionDetails, EmitMode, Emitter};
pub use event::{Event, EventSink, OtelEventSink};
pub use metrics::{MetricsSink, OperationUsage};
