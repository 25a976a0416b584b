//! Event sinks that keep what they receive

use std::sync::{Arc, Mutex};

use opentelemetry::logs::LoggerProvider;
use opentelemetry_sdk::logs::{InMemoryLogExporter, SdkLogger, SdkLoggerProvider};
use promptwire_emit::{Event, EventSink, OtelEventSink};

/// Sink collecting events in memory
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Everything emitted so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Event names in emission order
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name).collect()
    }

    /// First event with the given name
    pub fn find(&self, name: &str) -> Option<Event> {
        self.events.lock().unwrap().iter().find(|e| e.name == name).cloned()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

/// OpenTelemetry logs pipeline ending in an in-memory exporter
pub struct OtelPipeline {
    pub exporter: InMemoryLogExporter,
    provider: SdkLoggerProvider,
}

impl OtelPipeline {
    pub fn new() -> Self {
        let exporter = InMemoryLogExporter::default();
        let provider = SdkLoggerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();

        Self { exporter, provider }
    }

    /// Event sink writing into this pipeline
    pub fn sink(&self) -> Arc<OtelEventSink<SdkLogger>> {
        Arc::new(OtelEventSink::new(self.provider.logger("promptwire")))
    }

    /// Event names of the exported log records
    pub fn event_names(&self) -> Vec<String> {
        self.exporter
            .get_emitted_logs()
            .unwrap()
            .iter()
            .filter_map(|log| log.record.event_name().map(str::to_owned))
            .collect()
    }
}
