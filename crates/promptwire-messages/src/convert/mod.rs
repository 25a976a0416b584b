//! Normalization from provider payloads into the canonical model
//!
//! Part classification uses a fixed precedence, first match wins:
//! text, inline blob, file reference, tool call request, tool call response.
//! A part matching none of them becomes [`MessagePart::Unknown`] and the rest
//! of the message is still converted.

pub mod google;
pub mod openai;

use std::borrow::Cow;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::protocol::{PartFields, RawCandidate, RawContent};
use crate::types::{ChatMessage, Choice, InputMessages, MessagePart, OutputMessages, SystemMessage};

/// How candidates without content map onto output messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateMapping {
    /// Drop candidates without content (legacy output shape)
    SkipEmpty,
    /// Keep every candidate, pairing its finish reason with an absent message
    #[default]
    KeepEmpty,
}

/// Normalize request turns
pub fn normalize_input<C: RawContent>(contents: &[C]) -> InputMessages {
    contents.iter().map(to_chat_message).collect()
}

/// Normalize candidates into one choice per candidate
pub fn normalize_output<K: RawCandidate>(candidates: &[K], mapping: CandidateMapping) -> OutputMessages {
    candidates
        .iter()
        .filter_map(|candidate| {
            let message = candidate.content().map(to_chat_message);
            if message.is_none() && mapping == CandidateMapping::SkipEmpty {
                return None;
            }
            Some(Choice {
                finish_reason: candidate.finish_reason(),
                message,
            })
        })
        .collect()
}

/// Normalize system instructions, if the request carried any
pub fn normalize_system<C: RawContent>(content: Option<&C>) -> Option<SystemMessage> {
    content.map(|content| SystemMessage(vec![to_chat_message(content)]))
}

/// Normalize one provider message
pub fn to_chat_message<C: RawContent + ?Sized>(content: &C) -> ChatMessage {
    let role = content.role();
    let parts = content
        .parts()
        .into_iter()
        .enumerate()
        .map(|(index, fields)| to_part(fields, index))
        .collect();

    ChatMessage { role, parts }
}

/// Classify one part's candidate fields
///
/// `index` is the part's zero-based position within its message, used to
/// synthesize tool call identifiers the provider left out.
pub fn to_part(fields: PartFields<'_>, index: usize) -> MessagePart {
    if let Some(text) = fields.text {
        return MessagePart::Text {
            content: text.into_owned(),
        };
    }

    if let Some(blob) = fields.blob {
        return MessagePart::Blob {
            mime_type: blob.mime_type.map(Cow::into_owned).unwrap_or_default(),
            data: blob.data.into_owned(),
        };
    }

    if let Some(file) = fields.file {
        return MessagePart::FileReference {
            mime_type: file.mime_type.map(Cow::into_owned).unwrap_or_default(),
            uri: file.uri.map(Cow::into_owned).unwrap_or_default(),
        };
    }

    if let Some(call) = fields.tool_call {
        return MessagePart::ToolCallRequest {
            id: tool_call_id(call.id.as_deref(), call.name.as_deref(), index),
            name: call.name.map(Cow::into_owned).unwrap_or_default(),
            arguments: call.arguments.map(Cow::into_owned),
        };
    }

    if let Some(response) = fields.tool_response {
        return MessagePart::ToolCallResponse {
            id: tool_call_id(response.id.as_deref(), response.name.as_deref(), index),
            name: response.name.map(Cow::into_owned),
            result: response.result.map(Cow::into_owned),
        };
    }

    tracing::info!(index, "unknown message part recorded without content");
    MessagePart::Unknown
}

/// Decode base64 part data, logging and dropping it when malformed
fn decode_or_warn(encoded: &str) -> Option<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .inspect_err(|e| tracing::warn!(error = %e, "failed to decode base64 content part"))
        .ok()
}

/// Explicit id if present, else `{name}_{index}`, else `{index}`
fn tool_call_id(id: Option<&str>, name: Option<&str>, index: usize) -> String {
    match (id, name) {
        (Some(id), _) if !id.is_empty() => id.to_owned(),
        (_, Some(name)) if !name.is_empty() => format!("{name}_{index}"),
        _ => index.to_string(),
    }
}
