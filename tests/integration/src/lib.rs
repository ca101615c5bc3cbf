//! Integration test utilities for the comments server
//!
//! This crate provides helpers for running end-to-end tests against the
//! REST API. Tests run over the in-memory store, so no external services
//! are needed.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
