//! Common test utilities for checkprune-ir
//!
//! Shared scenario builders, trace fixtures and assertions for the
//! integration tests.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
