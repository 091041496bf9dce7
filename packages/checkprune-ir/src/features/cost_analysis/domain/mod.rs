//! Domain models for check cost ranking
//!
//! Pure business logic with no external dependencies.

use crate::shared::models::CheckId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dynamic cost of one sanitizer check
///
/// `cost = Σ cost(op) over the dependency cone × times executed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCost {
    pub id: CheckId,
    pub cost: u64,
    /// Cone operations the oracle priced at zero
    pub free_operations: usize,
}

/// Checks sharing one cost value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostGroup {
    pub cost: u64,
    /// Enumeration order within the group
    pub members: Vec<CheckId>,
    /// Cumulative share of total cost before and after this group
    pub cost_range: [f64; 2],
    /// Cumulative share of the check count before and after this group
    pub rank_range: [f64; 2],
}

/// What happened to an inspected check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    RedundantWithUserCheck,
    RedundantWithSanitizerCheck,
    Live,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RedundantWithUserCheck => "redundant with user checks",
            Self::RedundantWithSanitizerCheck => "redundant with sanitizer checks",
            Self::Live => "live",
        }
    }
}

/// Cost position of one inspected check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDetail {
    pub id: CheckId,
    pub cost: u64,
    pub total_cost: u64,
    pub total_checks: usize,
    pub index_in_group: usize,
    pub group_size: usize,
    pub cost_range: [f64; 2],
    pub rank_range: [f64; 2],
    pub verdict: Verdict,
}

/// Sanitizer checks grouped by cost, ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostRanking {
    groups: Vec<CostGroup>,
    total_cost: u64,
    total_checks: usize,
}

impl CostRanking {
    pub fn from_costs(costs: &[CheckCost]) -> Self {
        let mut by_cost: BTreeMap<u64, Vec<CheckId>> = BTreeMap::new();
        let mut total_cost: u64 = 0;
        for c in costs {
            by_cost.entry(c.cost).or_default().push(c.id);
            total_cost = total_cost.saturating_add(c.cost);
        }

        let total_checks = costs.len();
        // denominators clamped so empty or free units rank at 0
        let cost_denominator = total_cost.max(1) as f64;
        let count_denominator = total_checks.max(1) as f64;

        let mut groups = Vec::with_capacity(by_cost.len());
        let mut cost_before = 0f64;
        let mut count_before = 0f64;
        for (cost, members) in by_cost {
            let cost_after = cost_before + cost as f64 * members.len() as f64;
            let count_after = count_before + members.len() as f64;
            groups.push(CostGroup {
                cost,
                members,
                cost_range: [cost_before / cost_denominator, cost_after / cost_denominator],
                rank_range: [count_before / count_denominator, count_after / count_denominator],
            });
            cost_before = cost_after;
            count_before = count_after;
        }

        Self {
            groups,
            total_cost,
            total_checks,
        }
    }

    pub fn groups(&self) -> &[CostGroup] {
        &self.groups
    }

    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    pub fn total_checks(&self) -> usize {
        self.total_checks
    }

    /// Group and position of a check
    pub fn locate(&self, id: CheckId) -> Option<(&CostGroup, usize)> {
        self.groups.iter().find_map(|group| {
            group
                .members
                .iter()
                .position(|&m| m == id)
                .map(|index| (group, index))
        })
    }

    pub fn detail(&self, id: CheckId, verdict: Verdict) -> Option<CheckDetail> {
        let (group, index) = self.locate(id)?;
        Some(CheckDetail {
            id,
            cost: group.cost,
            total_cost: self.total_cost,
            total_checks: self.total_checks,
            index_in_group: index,
            group_size: group.members.len(),
            cost_range: group.cost_range,
            rank_range: group.rank_range,
            verdict,
        })
    }
}
