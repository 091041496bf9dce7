//! Per-unit report types
//!
//! ```text
//! UnitReport
//! ├── counts      num_checks → after_phase1 → after_phase2 → after_phase3
//! ├── weights     weight     → weight_after_phase{1,2,3}
//! ├── cost        total_cost → total_cost_after
//! ├── eliminated  Vec<Elimination>
//! ├── warnings    Vec<Warning>
//! └── detail      Option<CheckDetail>
//! ```

use crate::features::cost_analysis::CheckDetail;
use crate::features::redundancy::Phase;
use crate::features::rewrite::RewriteOutcome;
use crate::shared::models::CheckId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which phases had dynamic evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceMode {
    Dynamic,
    StaticOnly,
}

/// Non-blocking problem met while processing a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A trace exists but does not match the check enumeration
    MismatchedEvidence { trace: String, reason: String },
    /// The sanitizer trace failed validation when re-read for phase 2
    CoverageSkipped { reason: String },
    /// Redundant check whose regular successor is unknown
    AmbiguousOutcome { check: CheckId },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedEvidence { trace, reason } => {
                write!(f, "coverage trace {} ignored: {}", trace, reason)
            }
            Self::CoverageSkipped { reason } => {
                write!(f, "coverage subsumption skipped: {}", reason)
            }
            Self::AmbiguousOutcome { check } => {
                write!(f, "check {} is redundant but its regular successor is unknown", check)
            }
        }
    }
}

/// One eliminated sanitizer check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub check: CheckId,
    pub by: CheckId,
    pub phase: Phase,
    /// Justification count
    pub count: u64,
    pub rewrite: RewriteOutcome,
}

/// Summary of one processed unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitReport {
    pub unit: String,
    pub num_user_checks: usize,
    pub num_checks: usize,
    pub after_phase1: usize,
    pub after_phase2: usize,
    /// Final live count
    pub after_phase3: usize,
    pub weight: u64,
    pub weight_after_phase1: u64,
    pub weight_after_phase2: u64,
    pub weight_after_phase3: u64,
    pub total_cost: u64,
    pub total_cost_after: u64,
    pub evidence: EvidenceMode,
    pub warnings: Vec<Warning>,
    pub eliminated: Vec<Elimination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<CheckDetail>,
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl UnitReport {
    pub fn eliminated_count(&self) -> usize {
        self.num_checks.saturating_sub(self.after_phase3)
    }

    pub fn percent_after_phase1(&self) -> f64 {
        percent(self.after_phase1 as u64, self.num_checks as u64)
    }

    pub fn percent_after_phase3(&self) -> f64 {
        percent(self.after_phase3 as u64, self.num_checks as u64)
    }

    pub fn percent_weight_after_phase1(&self) -> f64 {
        percent(self.weight_after_phase1, self.weight)
    }

    pub fn percent_weight_after_phase3(&self) -> f64 {
        percent(self.weight_after_phase3, self.weight)
    }

    pub fn percent_cost_after(&self) -> f64 {
        percent(self.total_cost_after, self.total_cost)
    }

    /// `unit num after1 after3 weight weight1 weight3 cost cost_after`
    pub fn summary_line(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {} {}",
            self.unit,
            self.num_checks,
            self.after_phase1,
            self.after_phase3,
            self.weight,
            self.weight_after_phase1,
            self.weight_after_phase3,
            self.total_cost,
            self.total_cost_after
        )
    }
}
