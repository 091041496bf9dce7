//! Dominance oracle
//!
//! Answers "does control always pass through block A before (or after)
//! block B" for the static subsumption phase.

pub mod infrastructure;

pub use infrastructure::DominanceOracle;
