//! Integration test utilities for the steward engine
//!
//! This crate provides in-memory implementations of the storage and
//! platform ports plus a harness that wires them into a `ServiceContext`,
//! so scenario tests can drive the whole engine without a database or a
//! live chat platform.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
