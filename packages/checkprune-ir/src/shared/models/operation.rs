//! Operation nodes of the dependency graph
//!
//! An operation is owned by its `ProgramUnit` and referenced by `NodeId`.
//! Operand edges point either at another operation, at a constant, or at
//! an opaque external value.

use super::ids::{BlockId, ExternalId, NodeId};
use serde::{Deserialize, Serialize};

/// Opcode class of an operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opcode {
    /// Any computation compared by opcode name (add, icmp.ult, zext, ...)
    Generic(String),
    /// Memory read; operand 0 is the address
    MemoryRead,
    /// Address computation; operand 0 is the base, the rest are indices
    AddressComputation,
    /// Control-flow merge (phi)
    ControlMerge,
    /// Conditional branch; operand 0 is the condition
    CondBranch,
    /// Materialized constant
    Constant,
}

impl Opcode {
    pub fn generic(name: impl Into<String>) -> Self {
        Opcode::Generic(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Opcode::Generic(name) => name,
            Opcode::MemoryRead => "load",
            Opcode::AddressComputation => "address",
            Opcode::ControlMerge => "merge",
            Opcode::CondBranch => "br",
            Opcode::Constant => "const",
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Opcode::ControlMerge)
    }
}

/// Constant operand value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    Int(u64),
    Bool(bool),
    /// Globals and other opaque constants, equal by name
    Symbol(String),
}

/// Operand dependency edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Node(NodeId),
    Constant(Constant),
    External(ExternalId),
}

impl Operand {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Operand::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            Operand::Constant(Constant::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Operand::Constant(_))
    }
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<ExternalId> for Operand {
    fn from(id: ExternalId) -> Self {
        Operand::External(id)
    }
}

impl From<Constant> for Operand {
    fn from(c: Constant) -> Self {
        Operand::Constant(c)
    }
}

/// Operation node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpNode {
    pub id: NodeId,
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
    /// Block the operation lives in
    pub block: BlockId,
    /// Optional SSA name (used by the induction-variable heuristic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Branch targets, `[left, right]` for conditional branches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub successors: Vec<BlockId>,
}

impl OpNode {
    /// Node operands only, in operand order
    pub fn node_operands(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.operands.iter().filter_map(Operand::as_node)
    }

    /// True when no operand edge leads to another operation
    pub fn has_no_node_operands(&self) -> bool {
        self.node_operands().next().is_none()
    }

    pub fn is_cond_branch(&self) -> bool {
        matches!(self.opcode, Opcode::CondBranch) && self.successors.len() == 2
    }

    /// Branch condition (operand 0) of a conditional branch
    pub fn condition(&self) -> Option<&Operand> {
        if self.is_cond_branch() {
            self.operands.first()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(opcode: Opcode, operands: Vec<Operand>) -> OpNode {
        OpNode {
            id: NodeId(0),
            opcode,
            operands,
            block: BlockId(0),
            name: None,
            successors: Vec::new(),
        }
    }

    #[test]
    fn test_node_operands_skip_constants() {
        let n = node(
            Opcode::generic("add"),
            vec![
                Operand::Node(NodeId(4)),
                Operand::Constant(Constant::Int(1)),
                Operand::External(ExternalId(0)),
            ],
        );
        assert_eq!(n.node_operands().collect::<Vec<_>>(), vec![NodeId(4)]);
        assert!(!n.has_no_node_operands());
    }

    #[test]
    fn test_condition_requires_two_successors() {
        let mut br = node(Opcode::CondBranch, vec![Operand::Node(NodeId(1))]);
        assert!(br.condition().is_none());

        br.successors = vec![BlockId(1), BlockId(2)];
        assert_eq!(br.condition(), Some(&Operand::Node(NodeId(1))));
    }

    #[test]
    fn test_opcode_names() {
        assert_eq!(Opcode::generic("icmp.ult").as_str(), "icmp.ult");
        assert_eq!(Opcode::MemoryRead.as_str(), "load");
        assert!(Opcode::ControlMerge.is_merge());
    }
}
