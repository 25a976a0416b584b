//! Shared fixtures for integration tests

#![allow(dead_code)]

pub mod mock_gcs;
pub mod sinks;
