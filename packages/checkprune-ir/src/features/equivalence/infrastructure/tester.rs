//! Same-location test between two fingerprints
//!
//! `same_location(A, B)` holds when every leaf of A finds a structural
//! match among the leaves of B. The relation is asymmetric: A belongs to
//! the check being proven redundant, B to the check covering it.

use crate::features::equivalence::domain::{ComparisonPolicy, OperandMatch};
use crate::features::slicing::{Fingerprint, Leaf, Slicer};
use crate::shared::models::{Constant, OpNode, Opcode, Operand, ProgramUnit};
use tracing::trace;

pub const DEFAULT_MAX_MATCH_DEPTH: usize = 32;

/// Structural equivalence tester
///
/// Owns the slicer so that sub-slices computed during recursion are
/// memoized for the whole unit.
#[derive(Debug)]
pub struct EquivalenceTester {
    slicer: Slicer,
    max_depth: usize,
    depth_limit_hits: u64,
}

impl Default for EquivalenceTester {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MATCH_DEPTH)
    }
}

impl EquivalenceTester {
    pub fn new(max_depth: usize) -> Self {
        Self {
            slicer: Slicer::new(),
            max_depth,
            depth_limit_hits: 0,
        }
    }

    pub fn slicer(&mut self) -> &mut Slicer {
        &mut self.slicer
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Comparisons abandoned at the recursion limit
    pub fn depth_limit_hits(&self) -> u64 {
        self.depth_limit_hits
    }

    pub fn same_location(
        &mut self,
        unit: &ProgramUnit,
        a: &Fingerprint,
        b: &Fingerprint,
        policy: ComparisonPolicy,
    ) -> bool {
        self.same_location_at(unit, a, b, policy, 0)
    }

    pub(crate) fn depth_exceeded(&mut self, depth: usize) -> bool {
        if depth >= self.max_depth {
            self.depth_limit_hits += 1;
            trace!(depth, max_depth = self.max_depth, "match depth limit reached");
            true
        } else {
            false
        }
    }

    fn same_location_at(
        &mut self,
        unit: &ProgramUnit,
        a: &Fingerprint,
        b: &Fingerprint,
        policy: ComparisonPolicy,
        depth: usize,
    ) -> bool {
        if a.is_empty() || a.len() > b.len() {
            return false;
        }
        if self.depth_exceeded(depth) {
            return false;
        }

        for &leaf_a in a {
            let mut matched = false;
            for &leaf_b in b {
                if self.leaf_matches(unit, leaf_a, leaf_b, policy, depth) {
                    matched = true;
                    break;
                }
            }
            if !matched {
                return false;
            }
        }
        true
    }

    fn leaf_matches(
        &mut self,
        unit: &ProgramUnit,
        leaf_a: Leaf,
        leaf_b: Leaf,
        policy: ComparisonPolicy,
        depth: usize,
    ) -> bool {
        if leaf_a == leaf_b {
            return true;
        }
        let Leaf::Node(id_b) = leaf_b else {
            return false;
        };
        let Some(b) = unit.node(id_b) else {
            return false;
        };

        if let Leaf::Node(id_a) = leaf_a {
            let Some(a) = unit.node(id_a) else {
                return false;
            };
            match (&a.opcode, &b.opcode) {
                // distinct merges never match
                (Opcode::ControlMerge, Opcode::ControlMerge) => return false,
                (Opcode::MemoryRead, Opcode::MemoryRead) => {
                    return self.same_read(unit, a, b, policy, depth)
                }
                (Opcode::AddressComputation, Opcode::AddressComputation)
                    if a.operands.len() == b.operands.len() =>
                {
                    return self.same_address(unit, a, b, policy, depth)
                }
                (Opcode::Generic(op_a), Opcode::Generic(op_b))
                    if op_a == op_b && a.operands.len() == b.operands.len() =>
                {
                    return self.same_operands(unit, a, b, policy, depth)
                }
                _ => {}
            }
        }

        self.descend(unit, leaf_a, b, policy, depth)
    }

    /// Two memory reads: compare what they read from
    fn same_read(
        &mut self,
        unit: &ProgramUnit,
        a: &OpNode,
        b: &OpNode,
        policy: ComparisonPolicy,
        depth: usize,
    ) -> bool {
        let (Some(addr_a), Some(addr_b)) = (single_operand(a), single_operand(b)) else {
            return false;
        };

        match (addr_a, addr_b) {
            (Operand::Node(p), Operand::Node(q)) => {
                if p == q {
                    return true;
                }
                let fa = self.slicer.slice(unit, *p, policy.leaves);
                let fb = self.slicer.slice(unit, *q, policy.leaves);
                self.same_location_at(unit, &fa, &fb, policy, depth + 1)
            }
            // a constant address slices to nothing and never matches
            (_, Operand::Node(q)) => {
                let fa = self.slicer.slice_operand(unit, addr_a, policy.leaves);
                let fb = self.slicer.slice(unit, *q, policy.leaves);
                self.same_location_at(unit, &fa, &fb, policy, depth + 1)
            }
            (Operand::Node(_), _) => false,
            (p, q) => p == q,
        }
    }

    /// Two address computations of equal arity, compared position-wise
    fn same_address(
        &mut self,
        unit: &ProgramUnit,
        a: &OpNode,
        b: &OpNode,
        policy: ComparisonPolicy,
        depth: usize,
    ) -> bool {
        for (op_a, op_b) in a.operands.iter().zip(&b.operands) {
            let ok = match (op_a, op_b) {
                (Operand::Node(p), Operand::Node(q)) => {
                    p == q || {
                        let fa = self.slicer.slice(unit, *p, policy.leaves);
                        let fb = self.slicer.slice(unit, *q, policy.leaves);
                        self.same_location_at(unit, &fa, &fb, policy, depth + 1)
                    }
                }
                // A's offset must stay within the bound B was computed over
                (Operand::Constant(Constant::Int(x)), Operand::Constant(Constant::Int(y))) => {
                    x <= y
                }
                (p, q) if p == q => true,
                (Operand::External(ext), Operand::Node(q)) => self
                    .slicer
                    .slice(unit, *q, policy.leaves)
                    .contains(&Leaf::External(*ext)),
                _ => false,
            };
            if !ok {
                return false;
            }
        }
        true
    }

    /// Two generic operations with the same opcode and arity
    ///
    /// Nullary operations have vacuously equal operands.
    fn same_operands(
        &mut self,
        unit: &ProgramUnit,
        a: &OpNode,
        b: &OpNode,
        policy: ComparisonPolicy,
        depth: usize,
    ) -> bool {
        match policy.operands {
            OperandMatch::Exact => a.operands == b.operands,
            OperandMatch::Structural => {
                for (op_a, op_b) in a.operands.iter().zip(&b.operands) {
                    if op_a == op_b {
                        continue;
                    }
                    let (Operand::Node(p), Operand::Node(q)) = (op_a, op_b) else {
                        return false;
                    };
                    let fa = self.slicer.slice(unit, *p, policy.leaves);
                    let fb = self.slicer.slice(unit, *q, policy.leaves);
                    if !self.same_location_at(unit, &fa, &fb, policy, depth + 1) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// B may be a larger expression containing A's leaf as a sub-term
    fn descend(
        &mut self,
        unit: &ProgramUnit,
        leaf_a: Leaf,
        b: &OpNode,
        policy: ComparisonPolicy,
        depth: usize,
    ) -> bool {
        if b.operands.is_empty() || b.opcode.is_merge() {
            return false;
        }
        let fa = Fingerprint::singleton(leaf_a);
        for operand in &b.operands {
            if operand.is_constant() {
                continue;
            }
            let fb = self.slicer.slice_operand(unit, operand, policy.leaves);
            if self.same_location_at(unit, &fa, &fb, policy, depth + 1) {
                return true;
            }
        }
        false
    }
}

fn single_operand(node: &OpNode) -> Option<&Operand> {
    match node.operands.as_slice() {
        [only] => Some(only),
        _ => None,
    }
}
