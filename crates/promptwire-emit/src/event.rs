//! Event records and the sinks they are written to

use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

use opentelemetry::logs::{AnyValue, LogRecord, Logger, Severity};
use opentelemetry::{Key, KeyValue, Value as AttributeValue};
use serde_json::Value;

/// One telemetry event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event name, e.g. `gen_ai.completion.details`
    pub name: &'static str,
    /// Attributes copied from the caller
    pub attributes: Vec<KeyValue>,
    /// JSON body; `None` when content capture elided it
    pub body: Option<Value>,
}

/// Destination for emitted events
pub trait EventSink: Send + Sync {
    /// Write one event; must not fail the caller
    fn emit(&self, event: Event);
}

/// Sink writing events as OpenTelemetry log records
///
/// The SDK logger attaches the span context active at emission time, which
/// is what correlates events with the call's span.
pub struct OtelEventSink<L> {
    logger: L,
}

impl<L: Logger> OtelEventSink<L> {
    /// Wrap a logger
    pub const fn new(logger: L) -> Self {
        Self { logger }
    }
}

impl<L> fmt::Debug for OtelEventSink<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtelEventSink").finish_non_exhaustive()
    }
}

impl<L: Logger + Send + Sync> EventSink for OtelEventSink<L> {
    fn emit(&self, event: Event) {
        let now = SystemTime::now();
        let mut record = self.logger.create_log_record();

        record.set_event_name(event.name);
        record.set_timestamp(now);
        record.set_observed_timestamp(now);
        record.set_severity_number(Severity::Info);
        record.set_severity_text("INFO");
        record.add_attributes(
            event
                .attributes
                .into_iter()
                .map(|kv| (kv.key, attribute_to_any(kv.value))),
        );
        if let Some(body) = event.body.and_then(json_to_any) {
            record.set_body(body);
        }

        self.logger.emit(record);
    }
}

fn attribute_to_any(value: AttributeValue) -> AnyValue {
    match value {
        AttributeValue::Bool(b) => AnyValue::Boolean(b),
        AttributeValue::I64(i) => AnyValue::Int(i),
        AttributeValue::F64(f) => AnyValue::Double(f),
        AttributeValue::String(s) => AnyValue::String(s),
        other => AnyValue::String(other.to_string().into()),
    }
}

/// Convert a JSON tree into a log body value
///
/// Log bodies have no null, so nulls are dropped from objects and arrays.
fn json_to_any(value: Value) -> Option<AnyValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(AnyValue::Boolean(b)),
        Value::Number(n) => n.as_i64().map(AnyValue::Int).or_else(|| n.as_f64().map(AnyValue::Double)),
        Value::String(s) => Some(AnyValue::String(s.into())),
        Value::Array(items) => Some(AnyValue::ListAny(Box::new(
            items.into_iter().filter_map(json_to_any).collect(),
        ))),
        Value::Object(fields) => Some(AnyValue::Map(Box::new(
            fields
                .into_iter()
                .filter_map(|(k, v)| json_to_any(v).map(|v| (Key::from(k), v)))
                .collect::<HashMap<_, _>>(),
        ))),
    }
}
