//! Cost Oracle port

use crate::shared::models::{NodeId, ProgramUnit};

/// Cost assumed for operations the oracle cannot price
pub const UNKNOWN_COST: u64 = 1;

/// Per-operation cost estimation - external collaborator
///
/// Used only for reporting and ranking; never for the elimination decision.
pub trait CostOracle {
    /// Scalar cost of one execution of `node`, `None` when unknown
    fn cost(&self, node: NodeId, unit: &ProgramUnit) -> Option<u64>;

    /// Cost with the unknown case defaulted
    fn cost_or_default(&self, node: NodeId, unit: &ProgramUnit) -> u64 {
        self.cost(node, unit).unwrap_or(UNKNOWN_COST)
    }
}
