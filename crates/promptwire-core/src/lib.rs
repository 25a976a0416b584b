//! Shared building blocks for Promptwire
//!
//! Holds the GenAI attribute and event-name constants every crate agrees on,
//! and the scope that keeps telemetry plumbing from instrumenting itself.

#![allow(clippy::must_use_candidate)]

pub mod attributes;
mod suppress;

pub use suppress::{is_suppressed, suppressed, suppressed_sync};
