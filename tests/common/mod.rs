//! Common test utilities for batch-gateway
//!
//! This module provides shared test infrastructure for all tests:
//! - Test fixtures and data factories
//! - A mock OpenAI batch API
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, openai};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let api = openai::MockOpenAI::start().await;
//!     let prompts = fixtures::PromptFactory::many(3);
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod openai;

// Re-export commonly used items
pub use fixtures::{PromptFactory, ResultLineFactory};
pub use openai::MockOpenAI;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err matching a pattern
#[macro_export]
macro_rules! assert_err {
    ($expr:expr, $pattern:pat) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => assert!(
                matches!(e, $pattern),
                "Error did not match {}: {:?}",
                stringify!($pattern),
                e
            ),
        }
    };
}
