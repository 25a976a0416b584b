use serde::Deserialize;

/// Message content capture configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureConfig {
    /// Whether message content is recorded at all
    #[serde(default)]
    pub message_content: bool,
    /// Where captured content is placed
    #[serde(default)]
    pub mode: ContentMode,
    /// How candidates without content are represented
    #[serde(default)]
    pub candidate_mapping: CandidateMappingMode,
}

/// Placement of captured content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Embed content in the completion event
    #[default]
    Inline,
    /// Upload content and record its locator
    Reference,
}

/// Representation of candidates that carry no content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateMappingMode {
    /// Drop them from the output messages
    SkipEmpty,
    /// Keep them with only a finish reason
    #[default]
    KeepEmpty,
}
