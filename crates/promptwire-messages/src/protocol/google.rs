//! Google GenAI (Gemini / Vertex AI) payload types
//!
//! Field names follow the REST API (camelCase); snake_case aliases accept
//! payloads captured from the Vertex and client SDKs. Unknown fields are
//! ignored so newer part kinds deserialize and degrade to unknown parts.

use serde::Deserialize;
use serde_json::Value;

// -- Request types --

/// `generateContent` request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRequest {
    /// Conversation contents
    #[serde(default)]
    pub contents: Vec<GoogleContent>,
    /// System instruction
    #[serde(default, alias = "system_instruction")]
    pub system_instruction: Option<GoogleContent>,
}

/// Content object containing a role and parts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleContent {
    /// Role ("user" or "model")
    #[serde(default)]
    pub role: Option<String>,
    /// Content parts
    #[serde(default)]
    pub parts: Option<Vec<GooglePart>>,
}

/// Individual part within a content object
///
/// Every field is optional; a part matching none of them is an unknown kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePart {
    /// Text content
    #[serde(default)]
    pub text: Option<String>,
    /// Inline data (e.g. images)
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<GoogleBlob>,
    /// Reference to an uploaded file
    #[serde(default, alias = "file_data")]
    pub file_data: Option<GoogleFileData>,
    /// Function call from the model
    #[serde(default, alias = "function_call")]
    pub function_call: Option<GoogleFunctionCall>,
    /// Function response from the user
    #[serde(default, alias = "function_response")]
    pub function_response: Option<GoogleFunctionResponse>,
}

/// Inline binary data
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleBlob {
    /// MIME type (e.g. "image/png")
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    /// Base64 encoded bytes, decoded during normalization
    #[serde(default)]
    pub data: Option<String>,
}

/// Reference to an uploaded file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleFileData {
    /// MIME type
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    /// File URI (e.g. "gs://bucket/file.pdf")
    #[serde(default, alias = "file_uri")]
    pub file_uri: Option<String>,
}

/// Function call from the model
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleFunctionCall {
    /// Call identifier (often omitted)
    #[serde(default)]
    pub id: Option<String>,
    /// Function name
    #[serde(default)]
    pub name: Option<String>,
    /// Function arguments as JSON
    #[serde(default)]
    pub args: Option<Value>,
}

/// Function response from the user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleFunctionResponse {
    /// Identifier of the call this responds to
    #[serde(default)]
    pub id: Option<String>,
    /// Function name
    #[serde(default)]
    pub name: Option<String>,
    /// Response content as JSON
    #[serde(default)]
    pub response: Option<Value>,
}

// -- Response types --

/// `generateContent` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GoogleCandidate>,
    /// Token usage metadata
    #[serde(default, alias = "usage_metadata")]
    pub usage_metadata: Option<GoogleUsageMetadata>,
    /// Response identifier
    #[serde(default, alias = "response_id")]
    pub response_id: Option<String>,
    /// Model version that served the request
    #[serde(default, alias = "model_version")]
    pub model_version: Option<String>,
}

/// Generated candidate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCandidate {
    /// Generated content; absent when generation was blocked
    #[serde(default)]
    pub content: Option<GoogleContent>,
    /// Finish reason enum name (e.g. "STOP", "MAX_TOKENS")
    #[serde(default, alias = "finish_reason")]
    pub finish_reason: Option<String>,
    /// Candidate index
    #[serde(default)]
    pub index: Option<u32>,
}

/// Token usage metadata
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleUsageMetadata {
    /// Prompt token count
    #[serde(default, alias = "prompt_token_count")]
    pub prompt_token_count: Option<u64>,
    /// Candidates token count
    #[serde(default, alias = "candidates_token_count")]
    pub candidates_token_count: Option<u64>,
    /// Total token count
    #[serde(default, alias = "total_token_count")]
    pub total_token_count: Option<u64>,
}
