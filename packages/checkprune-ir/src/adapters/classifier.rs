//! Table-driven check classifier
//!
//! Serves checks from explicit tables. Dependency cones default to the
//! operations a branch transitively depends on, stopping at control merges.

use crate::shared::models::{CheckId, ConditionalCheck, NodeId, ProgramUnit, RegularSuccessor};
use crate::shared::ports::CheckClassifier;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableClassifier {
    sanitizer: Vec<ConditionalCheck>,
    user: Vec<ConditionalCheck>,
    cones: FxHashMap<CheckId, Vec<NodeId>>,
    successors: FxHashMap<CheckId, RegularSuccessor>,
}

impl TableClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sanitizer check to the enumeration
    pub fn with_sanitizer(mut self, check: ConditionalCheck, successor: RegularSuccessor) -> Self {
        self.successors.insert(check.id, successor);
        self.sanitizer.push(check);
        self
    }

    /// Append a user check to the enumeration
    pub fn with_user(mut self, check: ConditionalCheck) -> Self {
        self.user.push(check);
        self
    }

    /// Override the dependency cone of a check
    pub fn with_cone(mut self, id: CheckId, cone: Vec<NodeId>) -> Self {
        self.cones.insert(id, cone);
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl CheckClassifier for TableClassifier {
    fn sanitizer_checks(&self, _unit: &ProgramUnit) -> Vec<ConditionalCheck> {
        self.sanitizer.clone()
    }

    fn user_checks(&self, _unit: &ProgramUnit) -> Vec<ConditionalCheck> {
        self.user.clone()
    }

    fn dependency_cone(&self, unit: &ProgramUnit, check: &ConditionalCheck) -> Vec<NodeId> {
        match self.cones.get(&check.id) {
            Some(cone) => cone.clone(),
            None => operand_cone(unit, check.branch),
        }
    }

    fn regular_successor(&self, _unit: &ProgramUnit, check: &ConditionalCheck) -> RegularSuccessor {
        self.successors
            .get(&check.id)
            .copied()
            .unwrap_or(RegularSuccessor::Unknown)
    }
}

/// `root` and everything it depends on, in node id order
fn operand_cone(unit: &ProgramUnit, root: NodeId) -> Vec<NodeId> {
    let mut cone = BTreeSet::new();
    let mut visited = FxHashSet::default();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = unit.node(id) else {
            continue;
        };
        cone.insert(id);
        if !node.opcode.is_merge() {
            stack.extend(node.node_operands());
        }
    }
    cone.into_iter().collect()
}
