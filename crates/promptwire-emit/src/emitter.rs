use std::sync::Arc;

use opentelemetry::KeyValue;
use promptwire_config::{CaptureConfig, CandidateMappingMode, ContentMode};
use promptwire_core::attributes::{
    EVENT_CHOICE, EVENT_COMPLETION_DETAILS, EVENT_SYSTEM_MESSAGE, EVENT_USER_MESSAGE, GEN_AI_INPUT_MESSAGES,
    GEN_AI_INPUT_MESSAGES_REF, GEN_AI_OUTPUT_MESSAGES, GEN_AI_OUTPUT_MESSAGES_REF, GEN_AI_SYSTEM_INSTRUCTIONS,
    GEN_AI_SYSTEM_INSTRUCTIONS_REF,
};
use promptwire_core::is_suppressed;
use promptwire_messages::protocol::RawCandidate;
use promptwire_messages::{
    CandidateMapping, ChatMessage, InputMessages, OutputMessages, Role, SystemMessage, ToWire, normalize_output,
};
use promptwire_upload::{StorageHandle, upload_to_storage};
use serde_json::{Map, Value};

use crate::event::{Event, EventSink};
use crate::metrics::{MetricsSink, OperationUsage};

/// Where completion content is placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmitMode {
    /// Content embedded in the event body
    #[default]
    Inline,
    /// Content uploaded, locators in the event body
    Reference,
}

impl From<ContentMode> for EmitMode {
    fn from(mode: ContentMode) -> Self {
        match mode {
            ContentMode::Inline => Self::Inline,
            ContentMode::Reference => Self::Reference,
        }
    }
}

/// Content capture policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Whether message content may be recorded
    pub message_content: bool,
    /// Placement used by [`Emitter::emit_call`]
    pub mode: EmitMode,
    /// Representation of candidates without content
    pub candidate_mapping: CandidateMapping,
}

impl From<&CaptureConfig> for CaptureSettings {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            message_content: config.message_content,
            mode: config.mode.into(),
            candidate_mapping: match config.candidate_mapping {
                CandidateMappingMode::SkipEmpty => CandidateMapping::SkipEmpty,
                CandidateMappingMode::KeepEmpty => CandidateMapping::KeepEmpty,
            },
        }
    }
}

/// Everything recorded about one completed call
#[derive(Debug, Clone, Default)]
pub struct CompletionDetails {
    /// System instructions sent separately from the chat history
    pub system_instructions: Option<SystemMessage>,
    /// Request turns
    pub input_messages: InputMessages,
    /// One choice per candidate
    pub output_messages: OutputMessages,
    /// Duration and token counts
    pub usage: OperationUsage,
}

/// Writes GenAI events, metrics and reference-mode uploads
///
/// Every method is infallible from the caller's view and a no-op while
/// instrumentation is suppressed.
#[derive(Clone)]
pub struct Emitter {
    events: Arc<dyn EventSink>,
    metrics: Option<Arc<dyn MetricsSink>>,
    storage: StorageHandle,
    capture: CaptureSettings,
}

impl Emitter {
    /// Emitter with content capture off, no metrics and the process-wide storage backend
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            events,
            metrics: None,
            storage: StorageHandle::Global,
            capture: CaptureSettings::default(),
        }
    }

    /// Record per-call measurements on `metrics`
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Upload reference-mode content through `storage`
    #[must_use]
    pub fn with_storage(mut self, storage: StorageHandle) -> Self {
        self.storage = storage;
        self
    }

    /// Apply a content capture policy
    #[must_use]
    pub const fn with_capture(mut self, capture: CaptureSettings) -> Self {
        self.capture = capture;
        self
    }

    /// Active content capture policy
    pub const fn capture(&self) -> &CaptureSettings {
        &self.capture
    }

    /// Normalize response candidates with the configured candidate mapping
    pub fn output_messages<K: RawCandidate>(&self, candidates: &[K]) -> OutputMessages {
        normalize_output(candidates, self.capture.candidate_mapping)
    }

    /// Emit `gen_ai.system.message`
    pub fn emit_system_prompt(&self, attributes: &[KeyValue], system: &ChatMessage) {
        if is_suppressed() {
            return;
        }
        tracing::debug!("recording system prompt");
        self.emit_prompt(EVENT_SYSTEM_MESSAGE, Role::System.as_str(), attributes, system);
    }

    /// Emit `gen_ai.user.message`
    pub fn emit_user_prompt(&self, attributes: &[KeyValue], message: &ChatMessage) {
        if is_suppressed() {
            return;
        }
        tracing::debug!("recording user prompt");
        self.emit_prompt(EVENT_USER_MESSAGE, Role::User.as_str(), attributes, message);
    }

    fn emit_prompt(&self, name: &'static str, role: &str, attributes: &[KeyValue], message: &ChatMessage) {
        let mut body = Map::new();
        body.insert("role".to_owned(), Value::from(role));
        if self.capture.message_content {
            body.insert("content".to_owned(), message.parts.to_wire());
        }

        self.events.emit(Event {
            name,
            attributes: attributes.to_vec(),
            body: Some(Value::Object(body)),
        });
    }

    /// Emit one legacy `gen_ai.choice` event per choice
    pub fn emit_choices(&self, attributes: &[KeyValue], output: &OutputMessages) {
        if is_suppressed() {
            return;
        }
        tracing::debug!(choices = output.len(), "recording response choices");

        for (index, choice) in output.iter().enumerate() {
            let mut body = Map::new();
            body.insert("index".to_owned(), Value::from(index));
            body.insert("finish_reason".to_owned(), Value::from(choice.finish_reason.as_str()));

            if let Some(ref message) = choice.message {
                let mut message_body = Map::new();
                message_body.insert("role".to_owned(), Value::from(message.role.as_str()));
                if self.capture.message_content {
                    message_body.insert("content".to_owned(), message.parts.to_wire());
                }
                body.insert("message".to_owned(), Value::Object(message_body));
            }

            self.events.emit(Event {
                name: EVENT_CHOICE,
                attributes: attributes.to_vec(),
                body: Some(Value::Object(body)),
            });
        }
    }

    /// Emit `gen_ai.completion.details` and record the call's metrics
    ///
    /// With content capture off the event carries no body and nothing is
    /// uploaded. In reference mode each collection is stored as
    /// `{response_id}_{input|output|system_instructions}.json`.
    pub async fn emit_completion(
        &self,
        attributes: &[KeyValue],
        details: &CompletionDetails,
        mode: EmitMode,
        response_id: &str,
    ) {
        if is_suppressed() {
            return;
        }

        if let Some(ref metrics) = self.metrics {
            metrics.record_operation(&details.usage, attributes);
        }

        let body = if self.capture.message_content {
            let body = match mode {
                EmitMode::Inline => {
                    tracing::debug!("recording completion details");
                    inline_body(details)
                }
                EmitMode::Reference => {
                    tracing::debug!(response_id, "recording completion details as references");
                    self.reference_body(details, response_id).await
                }
            };
            Some(Value::Object(body))
        } else {
            tracing::debug!("recording completion details without content");
            None
        };

        self.events.emit(Event {
            name: EVENT_COMPLETION_DETAILS,
            attributes: attributes.to_vec(),
            body,
        });
    }

    /// Emit a whole call in order: system prompt, user prompts, completion
    ///
    /// Uses the configured [`EmitMode`].
    pub async fn emit_call(&self, attributes: &[KeyValue], details: &CompletionDetails, response_id: &str) {
        if is_suppressed() {
            return;
        }

        if let Some(system) = present(details.system_instructions.as_ref()) {
            for message in system.iter() {
                self.emit_system_prompt(attributes, message);
            }
        }

        for message in details.input_messages.iter().filter(|m| m.role == Role::User) {
            self.emit_user_prompt(attributes, message);
        }

        self.emit_completion(attributes, details, self.capture.mode, response_id)
            .await;
    }

    async fn reference_body(&self, details: &CompletionDetails, response_id: &str) -> Map<String, Value> {
        let input_name = format!("{response_id}_input.json");
        let output_name = format!("{response_id}_output.json");
        let system_name = format!("{response_id}_system_instructions.json");

        let input = details.input_messages.to_wire();
        let output = details.output_messages.to_wire();
        let system = present(details.system_instructions.as_ref()).map(ToWire::to_wire);

        let (input_ref, output_ref, system_ref) = tokio::join!(
            upload_to_storage(&self.storage, &input_name, &input),
            upload_to_storage(&self.storage, &output_name, &output),
            async {
                match system {
                    Some(ref system) => Some(upload_to_storage(&self.storage, &system_name, system).await),
                    None => None,
                }
            },
        );

        let mut body = Map::new();
        body.insert(GEN_AI_INPUT_MESSAGES_REF.to_owned(), Value::from(input_ref));
        body.insert(GEN_AI_OUTPUT_MESSAGES_REF.to_owned(), Value::from(output_ref));
        if let Some(system_ref) = system_ref {
            body.insert(GEN_AI_SYSTEM_INSTRUCTIONS_REF.to_owned(), Value::from(system_ref));
        }
        body
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("storage", &self.storage)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

fn inline_body(details: &CompletionDetails) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(GEN_AI_INPUT_MESSAGES.to_owned(), details.input_messages.to_wire());
    body.insert(GEN_AI_OUTPUT_MESSAGES.to_owned(), details.output_messages.to_wire());
    if let Some(system) = present(details.system_instructions.as_ref()) {
        body.insert(GEN_AI_SYSTEM_INSTRUCTIONS.to_owned(), system.to_wire());
    }
    body
}

/// System instructions count as absent when empty
fn present(system: Option<&SystemMessage>) -> Option<&SystemMessage> {
    system.filter(|s| !s.is_empty())
}
