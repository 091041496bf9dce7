/*
 * Checkprune IR - Redundant Sanitizer Check Elimination
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Dependency graph, CFG and check models; collaborator ports
 * - features/    : Vertical slices (coverage → slicing → equivalence → dominance
 *                  → redundancy → rewrite, plus cost analysis)
 * - pipeline/    : Per-unit orchestration and the report stream
 * - config/      : Precision level, phase toggles, traces, limits (YAML)
 * - adapters/    : Reference classifier and cost oracles
 *
 * A sanitizer check is eliminated only when another check is proven to
 * cover it, through coverage counts or through (post-)dominance.
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Phase entry points take the whole unit context
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and collaborator ports
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Reference adapters for the collaborator ports
pub mod adapters;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{PrecisionLevel, PruneConfig};
pub use errors::{PruneError, Result};
pub use pipeline::{PrunePipeline, UnitOutcome, UnitReport};
pub use shared::models::{
    CheckId, ConditionalCheck, GuardKind, ProgramUnit, RegularSuccessor, UnitBuilder,
};
pub use shared::ports::{CheckClassifier, CostOracle};
