//! Cost oracle adapters

use crate::shared::models::{NodeId, ProgramUnit};
use crate::shared::ports::CostOracle;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Every operation costs 1
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCost;

impl CostOracle for UniformCost {
    fn cost(&self, node: NodeId, unit: &ProgramUnit) -> Option<u64> {
        unit.node(node).map(|_| 1)
    }
}

/// Costs keyed by opcode name (`load`, `address`, `icmp.ult`, ...)
///
/// Opcodes missing from the table are unknown and fall back to the
/// oracle default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpcodeCostTable {
    costs: FxHashMap<String, u64>,
}

impl OpcodeCostTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, opcode: impl Into<String>, cost: u64) -> Self {
        self.costs.insert(opcode.into(), cost);
        self
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

impl CostOracle for OpcodeCostTable {
    fn cost(&self, node: NodeId, unit: &ProgramUnit) -> Option<u64> {
        let node = unit.node(node)?;
        self.costs.get(node.opcode.as_str()).copied()
    }
}
