//! Redundancy domain models

mod redundancy_set;
mod strategy;

pub use redundancy_set::{Phase, RedundancyEntry, RedundancySet};
pub use strategy::{effective_block, EvidenceSource, SubsumptionMatcher};
