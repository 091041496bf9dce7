//! Redundancy application layer

mod engine;

pub use engine::{CheckInventory, RedundancyEngine};
