//! Provider payload shapes and the extraction contract they implement
//!
//! Each provider module holds the wire types an instrumented client hands
//! over. Normalization never probes those types directly: a provider shape
//! implements [`RawContent`] and [`RawCandidate`], reporting every candidate
//! field of each part as [`PartFields`]. Classification then happens in one
//! place with one precedence order.

use std::borrow::Cow;

use serde_json::Value;

use crate::types::{FinishReason, Role};

pub mod google;
pub mod openai;

/// Candidate fields found on one raw part
///
/// Providers may populate several optional fields on the same part object;
/// all of them are reported here and the normalizer picks one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartFields<'a> {
    /// Text content
    pub text: Option<Cow<'a, str>>,
    /// Inline binary data
    pub blob: Option<BlobFields<'a>>,
    /// Reference to externally stored content
    pub file: Option<FileFields<'a>>,
    /// Tool invocation requested by the model
    pub tool_call: Option<ToolCallFields<'a>>,
    /// Result of a tool invocation
    pub tool_response: Option<ToolResponseFields<'a>>,
}

impl PartFields<'_> {
    /// Whether the part exposed no recognized field at all
    pub const fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.blob.is_none()
            && self.file.is_none()
            && self.tool_call.is_none()
            && self.tool_response.is_none()
    }
}

/// Inline binary data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobFields<'a> {
    /// MIME type, if reported
    pub mime_type: Option<Cow<'a, str>>,
    /// Decoded bytes
    pub data: Cow<'a, [u8]>,
}

/// Reference to externally stored content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFields<'a> {
    /// MIME type, if reported
    pub mime_type: Option<Cow<'a, str>>,
    /// Location of the content, if reported
    pub uri: Option<Cow<'a, str>>,
}

/// Tool invocation requested by the model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCallFields<'a> {
    /// Provider-assigned call identifier
    pub id: Option<Cow<'a, str>>,
    /// Tool name
    pub name: Option<Cow<'a, str>>,
    /// Structured arguments
    pub arguments: Option<Cow<'a, Value>>,
}

/// Result of a tool invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolResponseFields<'a> {
    /// Identifier of the call this responds to
    pub id: Option<Cow<'a, str>>,
    /// Tool name
    pub name: Option<Cow<'a, str>>,
    /// Structured result
    pub result: Option<Cow<'a, Value>>,
}

/// A provider message: one author and an ordered list of parts
pub trait RawContent {
    /// Canonical role for this message, using the provider's role rules
    fn role(&self) -> Role;

    /// Candidate fields of every part, in provider order
    fn parts(&self) -> Vec<PartFields<'_>>;
}

/// A provider candidate: an optional message plus a finish reason
pub trait RawCandidate {
    /// Message type carried by the candidate
    type Content: RawContent;

    /// Generated message, if the provider returned one
    fn content(&self) -> Option<&Self::Content>;

    /// Canonical finish reason, using the provider's mapping table
    fn finish_reason(&self) -> FinishReason;
}

impl<T: RawContent + ?Sized> RawContent for &T {
    fn role(&self) -> Role {
        (**self).role()
    }

    fn parts(&self) -> Vec<PartFields<'_>> {
        (**self).parts()
    }
}
