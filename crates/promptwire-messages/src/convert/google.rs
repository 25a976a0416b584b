//! Google GenAI extraction rules

use std::borrow::Cow;

use super::decode_or_warn;
use crate::protocol::google::{GoogleCandidate, GoogleContent, GooglePart};
use crate::protocol::{BlobFields, FileFields, PartFields, RawCandidate, RawContent, ToolCallFields, ToolResponseFields};
use crate::types::{FinishReason, Role};

impl RawContent for GoogleContent {
    fn role(&self) -> Role {
        match self.role.as_deref() {
            Some("user") => Role::User,
            Some("model") => Role::Assistant,
            _ => Role::unrecognized(),
        }
    }

    fn parts(&self) -> Vec<PartFields<'_>> {
        self.parts.iter().flatten().map(part_fields).collect()
    }
}

impl RawCandidate for GoogleCandidate {
    type Content = GoogleContent;

    fn content(&self) -> Option<&GoogleContent> {
        self.content.as_ref()
    }

    fn finish_reason(&self) -> FinishReason {
        self.finish_reason.as_deref().map_or_else(FinishReason::absent, map_finish_reason)
    }
}

/// Map a Google finish reason enum name to the canonical reason
pub fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "FINISH_REASON_UNSPECIFIED" | "UNSPECIFIED" | "OTHER" => FinishReason::Error,
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::Length,
        other => FinishReason::Other(other.to_owned()),
    }
}

fn part_fields(part: &GooglePart) -> PartFields<'_> {
    PartFields {
        text: part.text.as_deref().map(Cow::Borrowed),
        // Undecodable data leaves the part without a blob
        blob: part.inline_data.as_ref().and_then(|blob| {
            let data = match blob.data.as_deref() {
                Some(encoded) => decode_or_warn(encoded)?,
                None => Vec::new(),
            };
            Some(BlobFields {
                mime_type: blob.mime_type.as_deref().map(Cow::Borrowed),
                data: Cow::Owned(data),
            })
        }),
        file: part.file_data.as_ref().map(|file| FileFields {
            mime_type: file.mime_type.as_deref().map(Cow::Borrowed),
            uri: file.file_uri.as_deref().map(Cow::Borrowed),
        }),
        tool_call: part.function_call.as_ref().map(|call| ToolCallFields {
            id: call.id.as_deref().map(Cow::Borrowed),
            name: call.name.as_deref().map(Cow::Borrowed),
            arguments: call.args.as_ref().map(Cow::Borrowed),
        }),
        tool_response: part.function_response.as_ref().map(|response| ToolResponseFields {
            id: response.id.as_deref().map(Cow::Borrowed),
            name: response.name.as_deref().map(Cow::Borrowed),
            result: response.response.as_ref().map(Cow::Borrowed),
        }),
    }
}
