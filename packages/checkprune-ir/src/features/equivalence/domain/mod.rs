//! Equivalence domain models

use crate::features::slicing::LeafPolicy;
use crate::shared::models::GuardKind;

/// How operands of two generic operations with the same opcode are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandMatch {
    /// Operand edges must be identical
    Exact,
    /// Operation operands may resolve recursively through their slices
    Structural,
}

/// Leaf policy plus operand comparison used by one same-location query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComparisonPolicy {
    pub leaves: LeafPolicy,
    pub operands: OperandMatch,
}

impl ComparisonPolicy {
    /// Address checks recurse into sub-slices; generic checks need identical operands
    pub fn for_kind(kind: GuardKind) -> Self {
        match kind {
            GuardKind::Address => Self {
                leaves: LeafPolicy::ADDRESS,
                operands: OperandMatch::Structural,
            },
            GuardKind::Generic => Self {
                leaves: LeafPolicy::VALUE,
                operands: OperandMatch::Exact,
            },
        }
    }

    /// Same operand rule over value-provenance leaves
    pub fn with_value_leaves(self) -> Self {
        Self {
            leaves: LeafPolicy::VALUE,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_for_kind() {
        let address = ComparisonPolicy::for_kind(GuardKind::Address);
        assert_eq!(address.leaves, LeafPolicy::ADDRESS);
        assert_eq!(address.operands, OperandMatch::Structural);

        let generic = ComparisonPolicy::for_kind(GuardKind::Generic);
        assert_eq!(generic.leaves, LeafPolicy::VALUE);
        assert_eq!(generic.operands, OperandMatch::Exact);

        assert_eq!(address.with_value_leaves().leaves, LeafPolicy::VALUE);
        assert_eq!(address.with_value_leaves().operands, OperandMatch::Structural);
    }
}
