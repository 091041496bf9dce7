//! Check cost analysis
//!
//! Prices sanitizer checks for reporting. Costs never influence which
//! checks are eliminated.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - CheckCost, CostGroup, CostRanking    │
//! │  - CheckDetail, Verdict                 │
//! └─────────────────────────────────────────┘
//!                   ▲
//!                   │
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - CostAnalyzer (oracle-backed pricing) │
//! └─────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{CheckCost, CheckDetail, CostGroup, CostRanking, Verdict};
pub use infrastructure::CostAnalyzer;
