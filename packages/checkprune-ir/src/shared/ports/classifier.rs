//! Check Classifier port
//!
//! The classifier decides which branches are sanitizer checks and which
//! are user checks, and owns the per-check dependency cone. The engine
//! only consumes it.

use crate::shared::models::{ConditionalCheck, NodeId, ProgramUnit, RegularSuccessor};

/// Check Classifier - external collaborator
///
/// # Contract
/// - `sanitizer_checks` / `user_checks` return checks in a fixed,
///   deterministic order; the coverage traces are recorded in that order.
/// - Every returned check's `branch` is a conditional branch of `unit`.
///   Violations abort analysis of the unit.
pub trait CheckClassifier {
    /// Sanitizer checks of the unit, in enumeration order
    fn sanitizer_checks(&self, unit: &ProgramUnit) -> Vec<ConditionalCheck>;

    /// User checks of the unit, in enumeration order
    fn user_checks(&self, unit: &ProgramUnit) -> Vec<ConditionalCheck>;

    /// Operations belonging to a check (cost aggregation, effective block)
    fn dependency_cone(&self, unit: &ProgramUnit, check: &ConditionalCheck) -> Vec<NodeId>;

    /// Which branch target is the non-failure path
    fn regular_successor(&self, unit: &ProgramUnit, check: &ConditionalCheck) -> RegularSuccessor;
}
