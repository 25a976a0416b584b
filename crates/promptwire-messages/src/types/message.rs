use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};

use super::part::MessagePart;

/// Role of a message participant
///
/// Provider roles without a canonical counterpart are carried as
/// [`Role::Other`]; an empty string asserts nothing about the author.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
    /// Tool/function result
    Tool,
    /// Raw provider role
    Other(String),
}

impl Role {
    /// Role used when the provider value is missing or unrecognized
    pub const fn unrecognized() -> Self {
        Self::Other(String::new())
    }

    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Reason the model stopped generating
///
/// Provider reasons without a 1:1 mapping pass through as [`FinishReason::Other`]
/// holding the provider's own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FinishReason {
    /// Natural end of generation
    Stop,
    /// Hit the token limit
    Length,
    /// Content was filtered by safety systems
    ContentFilter,
    /// Model decided to call a tool
    ToolCall,
    /// Generation failed or ended for an unspecified reason
    Error,
    /// Raw provider reason
    Other(String),
}

impl FinishReason {
    /// Reason used when the provider reported none
    pub const fn absent() -> Self {
        Self::Other(String::new())
    }

    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ContentFilter => "content_filter",
            Self::ToolCall => "tool_call",
            Self::Error => "error",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FinishReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    /// Role of the message author
    pub role: Role,
    /// Parts in provider order
    pub parts: Vec<MessagePart>,
}

impl ChatMessage {
    /// Create a message from a role and its parts
    pub const fn new(role: Role, parts: Vec<MessagePart>) -> Self {
        Self { role, parts }
    }
}

/// A single candidate returned by the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    /// Why generation stopped
    pub finish_reason: FinishReason,
    /// Generated message, flattened next to the finish reason
    #[serde(flatten)]
    pub message: Option<ChatMessage>,
}

macro_rules! message_sequence {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec<$item>);

        impl Deref for $name {
            type Target = [$item];

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self(items)
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }
    };
}

message_sequence!(
    /// Request turns sent to the model
    InputMessages,
    ChatMessage
);

message_sequence!(
    /// One entry per candidate returned by the model
    OutputMessages,
    Choice
);

message_sequence!(
    /// System instructions, usually a single message
    SystemMessage,
    ChatMessage
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::ToWire;

    #[test]
    fn canonical_roles_serialize_lowercase() {
        let roles = [Role::System, Role::User, Role::Assistant, Role::Tool];
        let wire: Vec<_> = roles.iter().map(ToWire::to_wire).collect();
        assert_eq!(wire, vec![json!("system"), json!("user"), json!("assistant"), json!("tool")]);
    }

    #[test]
    fn raw_values_pass_through() {
        assert_eq!(Role::Other("critic".to_owned()).to_wire(), json!("critic"));
        assert_eq!(Role::unrecognized().to_wire(), json!(""));
        assert_eq!(FinishReason::Other("SAFETY".to_owned()).to_wire(), json!("SAFETY"));
        assert_eq!(FinishReason::absent().to_wire(), json!(""));
    }

    #[test]
    fn choice_flattens_message() {
        let choice = Choice {
            finish_reason: FinishReason::Stop,
            message: Some(ChatMessage::new(Role::Assistant, vec![MessagePart::text("hello")])),
        };

        assert_eq!(
            choice.to_wire(),
            json!({
                "finish_reason": "stop",
                "role": "assistant",
                "parts": [{"type": "text", "content": "hello"}]
            })
        );
    }

    #[test]
    fn choice_without_message_keeps_finish_reason_only() {
        let choice = Choice {
            finish_reason: FinishReason::Error,
            message: None,
        };

        assert_eq!(choice.to_wire(), json!({"finish_reason": "error"}));
    }

    #[test]
    fn sequences_serialize_as_arrays() {
        let input = InputMessages::from(vec![ChatMessage::new(Role::User, vec![MessagePart::text("hi")])]);
        assert_eq!(
            input.to_wire(),
            json!([{"role": "user", "parts": [{"type": "text", "content": "hi"}]}])
        );
        assert_eq!(OutputMessages::default().to_wire(), json!([]));
    }

    #[test]
    fn equality_is_structural() {
        let a = ChatMessage::new(Role::User, vec![MessagePart::text("hi"), MessagePart::Unknown]);
        let b = ChatMessage::new(Role::User, vec![MessagePart::text("hi"), MessagePart::Unknown]);
        let reordered = ChatMessage::new(Role::User, vec![MessagePart::Unknown, MessagePart::text("hi")]);

        assert_eq!(a, b);
        assert_ne!(a, reordered);
    }
}
