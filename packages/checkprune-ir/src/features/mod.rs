//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains (as needed):
//! - domain/         - Pure business logic (no external dependencies)
//! - application/    - Use cases
//! - infrastructure/ - Algorithms over the shared models and external crates

// Coverage trace ingestion and count-keyed pattern tables
pub mod coverage;

// Backward slicing to leaf fingerprints
pub mod slicing;

// Same-location and static pattern comparison
pub mod equivalence;

// Dominator / post-dominator trees (petgraph)
pub mod dominance;

// Per-check cost and ranking for reports
pub mod cost_analysis;

// Three-phase elimination engine
pub mod redundancy;

// Constant folding of eliminated checks
pub mod rewrite;
