//! Redundant check elimination
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ RedundancyEngine                                     │
//! │  phase 1  UC ─┐                                      │
//! │  phase 2  SC ─┼─ SubsumptionMatcher ─ Equivalence    │
//! │  phase 3  dom ┘         │                            │
//! │                         ▼                            │
//! │                   RedundancySet (insert-only)        │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The precision level and the evidence source of each phase select the
//! comparison; there is one implementation per phase, not per level.

pub mod application;
pub mod domain;

pub use application::{CheckInventory, RedundancyEngine};
pub use domain::{
    effective_block, EvidenceSource, Phase, RedundancyEntry, RedundancySet, SubsumptionMatcher,
};
