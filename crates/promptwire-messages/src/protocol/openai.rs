//! `OpenAI` chat completions payload types

use serde::Deserialize;

// -- Request types --

/// Chat completions request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiRequest {
    /// Model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// Conversation messages
    #[serde(default)]
    pub messages: Vec<OpenAiMessage>,
}

/// Message in a chat conversation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiMessage {
    /// Role ("system", "developer", "user", "assistant", "tool")
    #[serde(default)]
    pub role: Option<String>,
    /// Message content, plain text or parts
    #[serde(default)]
    pub content: Option<OpenAiContent>,
    /// Participant or function name
    #[serde(default)]
    pub name: Option<String>,
    /// Tool calls made by the assistant
    #[serde(default)]
    pub tool_calls: Option<Vec<OpenAiToolCall>>,
    /// ID of the tool call this message responds to
    #[serde(default)]
    pub tool_call_id: Option<String>,
}

/// Message content, either plain text or structured parts
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpenAiContent {
    /// Plain text content
    Text(String),
    /// Array of content parts
    Parts(Vec<OpenAiContentPart>),
}

/// Individual part within multipart content
///
/// Kept as a flat struct rather than a tagged enum so new part types still
/// deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiContentPart {
    /// Part type ("text", "image_url", "input_audio", ...)
    #[serde(default, rename = "type")]
    pub part_type: Option<String>,
    /// Text content
    #[serde(default)]
    pub text: Option<String>,
    /// Image reference
    #[serde(default)]
    pub image_url: Option<OpenAiImageUrl>,
    /// Inline audio
    #[serde(default)]
    pub input_audio: Option<OpenAiInputAudio>,
}

/// Image reference, a URL or a base64 data URI
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiImageUrl {
    /// URL or data URI
    pub url: String,
    /// Detail level hint
    #[serde(default)]
    pub detail: Option<String>,
}

/// Inline audio
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiInputAudio {
    /// Base64-encoded audio bytes
    pub data: String,
    /// Audio format (e.g. "wav", "mp3")
    pub format: String,
}

/// A tool call requested by the assistant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiToolCall {
    /// Tool call identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Function name and arguments
    #[serde(default)]
    pub function: Option<OpenAiFunctionCall>,
}

/// Function name and JSON-encoded arguments
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiFunctionCall {
    /// Function name
    #[serde(default)]
    pub name: Option<String>,
    /// JSON-encoded arguments
    #[serde(default)]
    pub arguments: Option<String>,
}

// -- Response types --

/// Chat completions response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiResponse {
    /// Response identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Model that generated the response
    #[serde(default)]
    pub model: Option<String>,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
    /// Token usage statistics
    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

/// A single completion choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiChoice {
    /// Index of this choice
    #[serde(default)]
    pub index: Option<u32>,
    /// Generated message
    #[serde(default)]
    pub message: Option<OpenAiMessage>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiUsage {
    /// Tokens consumed by the prompt
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    /// Tokens generated in the completion
    #[serde(default)]
    pub completion_tokens: Option<u64>,
}
