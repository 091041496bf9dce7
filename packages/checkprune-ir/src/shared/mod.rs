//! Shared module - Common types and ports
//!
//! Types used across all features: the program model and the traits of
//! the external collaborators (classifier, cost oracle).

pub mod models;
pub mod ports;

// Re-exports for convenience
pub use models::*;
