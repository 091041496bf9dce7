//! Equivalence infrastructure

pub mod pattern;
pub mod tester;

pub use pattern::is_induction_guard;
pub use tester::{EquivalenceTester, DEFAULT_MAX_MATCH_DEPTH};
