//! Canonical GenAI message model and provider payload normalization
//!
//! Provider payloads (`protocol`) are normalized (`convert`) into the
//! provider-agnostic model (`types`) that telemetry is emitted from. The model
//! is the stable wire contract; provider shapes can evolve underneath it.

#![allow(clippy::must_use_candidate)]

pub mod convert;
pub mod protocol;
pub mod types;

pub use convert::{CandidateMapping, normalize_input, normalize_output, normalize_system};
pub use types::{
    ChatMessage, Choice, FinishReason, InputMessages, MessagePart, OutputMessages, Role, SystemMessage, ToWire,
};
