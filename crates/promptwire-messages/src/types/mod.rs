//! Canonical types for GenAI telemetry payloads
//!
//! These types are provider-agnostic. Every supported payload shape is
//! normalized into them, and only these are ever serialized into events.

pub mod message;
pub mod part;
pub mod wire;

pub use message::{ChatMessage, Choice, FinishReason, InputMessages, OutputMessages, Role, SystemMessage};
pub use part::MessagePart;
pub use wire::ToWire;
