//! Integration tests for batch-gateway
//!
//! These tests drive the real OpenAI client against a wiremock server and
//! verify the row lifecycle across components.

pub mod http_tests;
pub mod lifecycle_tests;
