//! Ports to the collaborators surrounding the engine

pub mod classifier;
pub mod cost;

pub use classifier::CheckClassifier;
pub use cost::{CostOracle, UNKNOWN_COST};
