//! GenAI telemetry keys following the OpenTelemetry semantic conventions
//!
//! Event names and body keys must match exactly; consumers branch on them
//! without knowing anything else about the payload.

// -- Event names --

/// Event carrying the system prompt of a single call
pub const EVENT_SYSTEM_MESSAGE: &str = "gen_ai.system.message";

/// Event carrying one user prompt of a single call
pub const EVENT_USER_MESSAGE: &str = "gen_ai.user.message";

/// Event carrying the full request/response conversation of a call
pub const EVENT_COMPLETION_DETAILS: &str = "gen_ai.completion.details";

/// Legacy per-candidate event
pub const EVENT_CHOICE: &str = "gen_ai.choice";

// -- Event body keys --

/// Chat history sent to the model, inlined
pub const GEN_AI_INPUT_MESSAGES: &str = "gen_ai.input.messages";

/// Locator of the uploaded chat history
pub const GEN_AI_INPUT_MESSAGES_REF: &str = "gen_ai.input.messages_ref";

/// Candidates returned by the model, inlined
pub const GEN_AI_OUTPUT_MESSAGES: &str = "gen_ai.output.messages";

/// Locator of the uploaded candidates
pub const GEN_AI_OUTPUT_MESSAGES_REF: &str = "gen_ai.output.messages_ref";

/// System instructions provided separately from the chat history, inlined
pub const GEN_AI_SYSTEM_INSTRUCTIONS: &str = "gen_ai.system.instructions";

/// Locator of the uploaded system instructions
pub const GEN_AI_SYSTEM_INSTRUCTIONS_REF: &str = "gen_ai.system.instructions_ref";

// -- Span and metric attributes --

/// Name of the operation being performed (e.g. `generate_content`, `chat`)
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// Provider the instrumented client talks to (e.g. `gcp.gemini`, `openai`)
pub const GEN_AI_SYSTEM: &str = "gen_ai.system";

/// Model the request targets
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// Model that generated the response
pub const GEN_AI_RESPONSE_MODEL: &str = "gen_ai.response.model";

/// Provider-assigned identifier of the completion
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

/// Type of token counted by a usage measurement.
/// Known values: `input`, `output`.
pub const GEN_AI_TOKEN_TYPE: &str = "gen_ai.token.type";
