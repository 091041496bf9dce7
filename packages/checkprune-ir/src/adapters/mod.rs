//! Reference implementations of the collaborator ports
//!
//! Used by tests and by tools embedding the pipeline without their own
//! classifier or cost model.

pub mod classifier;
pub mod cost;

pub use classifier::TableClassifier;
pub use cost::{OpcodeCostTable, UniformCost};
