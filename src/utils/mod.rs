//! Utility modules for the batch gateway
//!
//! - **error**: Error types and their HTTP rendering
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
