//! Core functionality for the gateway
//!
//! This module contains the batch lifecycle logic and its data structures.

pub mod batch;
