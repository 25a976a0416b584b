//! `OpenAI` chat completions extraction rules

use std::borrow::Cow;

use serde_json::Value;

use super::decode_or_warn;

use crate::protocol::openai::{OpenAiChoice, OpenAiContent, OpenAiContentPart, OpenAiMessage, OpenAiToolCall};
use crate::protocol::{BlobFields, FileFields, PartFields, RawCandidate, RawContent, ToolCallFields, ToolResponseFields};
use crate::types::{FinishReason, Role};

impl RawContent for OpenAiMessage {
    fn role(&self) -> Role {
        match self.role.as_deref() {
            Some("system" | "developer") => Role::System,
            Some("user") => Role::User,
            Some("assistant") => Role::Assistant,
            Some("tool" | "function") => Role::Tool,
            _ => Role::unrecognized(),
        }
    }

    fn parts(&self) -> Vec<PartFields<'_>> {
        // A tool result carries its whole content as one response part
        if self.role() == Role::Tool {
            return vec![PartFields {
                tool_response: Some(ToolResponseFields {
                    id: self.tool_call_id.as_deref().map(Cow::Borrowed),
                    name: self.name.as_deref().map(Cow::Borrowed),
                    result: self.content.as_ref().map(|c| Cow::Owned(parse_json_or_string(&content_text(c)))),
                }),
                ..PartFields::default()
            }];
        }

        let mut parts = match &self.content {
            Some(OpenAiContent::Text(text)) => vec![PartFields {
                text: Some(Cow::Borrowed(text.as_str())),
                ..PartFields::default()
            }],
            Some(OpenAiContent::Parts(content_parts)) => content_parts.iter().map(content_part_fields).collect(),
            None => Vec::new(),
        };

        parts.extend(self.tool_calls.iter().flatten().map(tool_call_fields));
        parts
    }
}

impl RawCandidate for OpenAiChoice {
    type Content = OpenAiMessage;

    fn content(&self) -> Option<&OpenAiMessage> {
        self.message.as_ref()
    }

    fn finish_reason(&self) -> FinishReason {
        self.finish_reason.as_deref().map_or_else(FinishReason::absent, map_finish_reason)
    }
}

/// Map an `OpenAI` finish reason to the canonical reason
pub fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        "tool_calls" | "function_call" => FinishReason::ToolCall,
        other => FinishReason::Other(other.to_owned()),
    }
}

fn content_part_fields(part: &OpenAiContentPart) -> PartFields<'_> {
    match part.part_type.as_deref() {
        Some("text") => PartFields {
            text: part.text.as_deref().map(Cow::Borrowed),
            ..PartFields::default()
        },
        Some("image_url") => part
            .image_url
            .as_ref()
            .map(|image| url_fields(&image.url))
            .unwrap_or_default(),
        Some("input_audio") => part
            .input_audio
            .as_ref()
            .and_then(|audio| {
                let data = decode_or_warn(&audio.data)?;
                Some(PartFields {
                    blob: Some(BlobFields {
                        mime_type: Some(Cow::Owned(format!("audio/{}", audio.format))),
                        data: Cow::Owned(data),
                    }),
                    ..PartFields::default()
                })
            })
            .unwrap_or_default(),
        _ => PartFields::default(),
    }
}

/// Data URIs become inline blobs; any other URL is a file reference
fn url_fields(url: &str) -> PartFields<'_> {
    if let Some(rest) = url.strip_prefix("data:")
        && let Some((meta, encoded)) = rest.split_once(',')
        && let Some(mime_type) = meta.strip_suffix(";base64")
    {
        let Some(data) = decode_or_warn(encoded) else {
            return PartFields::default();
        };
        return PartFields {
            blob: Some(BlobFields {
                mime_type: Some(Cow::Borrowed(mime_type)),
                data: Cow::Owned(data),
            }),
            ..PartFields::default()
        };
    }

    PartFields {
        file: Some(FileFields {
            mime_type: None,
            uri: Some(Cow::Borrowed(url)),
        }),
        ..PartFields::default()
    }
}

fn tool_call_fields(call: &OpenAiToolCall) -> PartFields<'_> {
    let function = call.function.as_ref();
    PartFields {
        tool_call: Some(ToolCallFields {
            id: call.id.as_deref().map(Cow::Borrowed),
            name: function.and_then(|f| f.name.as_deref()).map(Cow::Borrowed),
            arguments: function
                .and_then(|f| f.arguments.as_deref())
                .map(|args| Cow::Owned(parse_json_or_string(args))),
        }),
        ..PartFields::default()
    }
}

fn content_text(content: &OpenAiContent) -> Cow<'_, str> {
    match content {
        OpenAiContent::Text(text) => Cow::Borrowed(text.as_str()),
        OpenAiContent::Parts(parts) => Cow::Owned(parts.iter().filter_map(|p| p.text.as_deref()).collect()),
    }
}

fn parse_json_or_string(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}
