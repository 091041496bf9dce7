//! Check cost analyzer
//!
//! Prices each sanitizer check's dependency cone through the cost oracle
//! and weights it by the check's dynamic count.

use crate::features::cost_analysis::domain::{CheckCost, CostRanking};
use crate::shared::models::{CheckId, NodeId, ProgramUnit};
use crate::shared::ports::CostOracle;
use tracing::debug;

pub struct CostAnalyzer<'a> {
    oracle: &'a dyn CostOracle,
}

impl<'a> CostAnalyzer<'a> {
    pub fn new(oracle: &'a dyn CostOracle) -> Self {
        Self { oracle }
    }

    /// Cost of one check; unknown operation costs count as 1
    pub fn check_cost(
        &self,
        unit: &ProgramUnit,
        id: CheckId,
        cone: &[NodeId],
        executions: u64,
    ) -> CheckCost {
        let mut cost: u64 = 0;
        let mut free_operations = 0;
        for &node in cone {
            let op_cost = self.oracle.cost_or_default(node, unit);
            if op_cost == 0 {
                free_operations += 1;
            }
            cost = cost.saturating_add(op_cost.saturating_mul(executions));
        }
        CheckCost {
            id,
            cost,
            free_operations,
        }
    }

    /// Rank already priced checks
    pub fn rank(&self, unit: &ProgramUnit, costs: &[CheckCost]) -> CostRanking {
        let ranking = CostRanking::from_costs(costs);
        debug!(
            unit = %unit.name,
            checks = ranking.total_checks(),
            groups = ranking.groups().len(),
            total_cost = ranking.total_cost(),
            "cost ranking built"
        );
        ranking
    }
}
