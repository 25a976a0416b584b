use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Individual part within a message
///
/// Serialized with an explicit `type` tag so consumers unaware of the schema
/// can still branch on the kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    /// Text content block
    Text {
        /// The text string
        content: String,
    },
    /// Inline binary payload
    Blob {
        /// MIME type (e.g. "image/png")
        mime_type: String,
        /// Raw bytes, written as base64 text
        #[serde(serialize_with = "serialize_base64")]
        data: Vec<u8>,
    },
    /// Reference to content stored elsewhere
    FileReference {
        /// MIME type of the referenced content
        mime_type: String,
        /// Location of the content
        uri: String,
    },
    /// Tool invocation requested by the model
    ToolCallRequest {
        /// Call identifier, synthesized when the provider omits it
        id: String,
        /// Tool name
        name: String,
        /// Structured arguments
        arguments: Option<Value>,
    },
    /// Result of a tool invocation
    ToolCallResponse {
        /// Identifier of the call this responds to
        id: String,
        /// Tool name, when the provider reports it
        name: Option<String>,
        /// Structured result
        result: Option<Value>,
    },
    /// Part kind that was not recognized; carries no content
    Unknown,
}

impl MessagePart {
    /// Create a text part
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Wire tag of this part
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Blob { .. } => "blob",
            Self::FileReference { .. } => "file_reference",
            Self::ToolCallRequest { .. } => "tool_call_request",
            Self::ToolCallResponse { .. } => "tool_call_response",
            Self::Unknown => "unknown",
        }
    }
}

// One-way: telemetry backends only read this, nothing decodes it again.
fn serialize_base64<T, S>(data: T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(data))
}
