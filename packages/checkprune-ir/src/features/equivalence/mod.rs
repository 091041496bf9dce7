//! Equivalence testing
//!
//! Decides whether two checks test the same variable or memory location.
//!
//! - `same_location`: full recursive comparison of two fingerprints
//! - `same_static_pattern`: shallow comparison of two condition operands
//! - `is_induction_guard`: condition driven by a single loop induction merge
//!
//! Recursion is bounded by the configured match depth; hitting the bound
//! counts as "no match".

pub mod domain;
pub mod infrastructure;

pub use domain::{ComparisonPolicy, OperandMatch};
pub use infrastructure::{is_induction_guard, EquivalenceTester, DEFAULT_MAX_MATCH_DEPTH};
