//! Subsumption strategy
//!
//! One matcher serves every phase. The precision level picks between the
//! shallow condition comparison and the full fingerprint comparison; the
//! evidence source decides whether a count match alone is proof.

use crate::config::PrecisionLevel;
use crate::features::equivalence::{is_induction_guard, ComparisonPolicy, EquivalenceTester};
use crate::features::slicing::{Fingerprint, Leaf};
use crate::shared::models::{
    BlockId, CheckOrigin, ConditionalCheck, GuardKind, NodeId, OpNode, Opcode, Operand,
    ProgramUnit,
};

/// What established that the two checks are related
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceSource {
    /// Equal coverage counts
    Coverage,
    /// Dominance or post-dominance between the checks' blocks
    Dominance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsumptionMatcher {
    level: PrecisionLevel,
    induction_prefix: String,
}

impl SubsumptionMatcher {
    pub fn new(level: PrecisionLevel, induction_prefix: impl Into<String>) -> Self {
        Self {
            level,
            induction_prefix: induction_prefix.into(),
        }
    }

    pub fn level(&self) -> PrecisionLevel {
        self.level
    }

    /// `candidate` is covered by `by`
    pub fn subsumed(
        &self,
        tester: &mut EquivalenceTester,
        unit: &ProgramUnit,
        candidate: &ConditionalCheck,
        by: &ConditionalCheck,
        source: EvidenceSource,
    ) -> bool {
        if source == EvidenceSource::Coverage && self.level.trusts_counts() {
            return true;
        }

        if self.level.is_shallow() {
            let (Some(a), Some(b)) = (condition_of(unit, candidate.branch), condition_of(unit, by.branch))
            else {
                return false;
            };
            return tester.same_static_pattern(unit, a, b);
        }

        let mut policy = ComparisonPolicy::for_kind(candidate.kind);
        let mut fingerprint = tester
            .slicer()
            .slice_check(unit, candidate.branch, policy.leaves);

        if source == EvidenceSource::Coverage
            && by.origin == CheckOrigin::User
            && candidate.kind == GuardKind::Address
        {
            if let Some(index) = index_fingerprint(tester, unit, &fingerprint) {
                fingerprint = index;
                policy = policy.with_value_leaves();
            }
        }

        let covering = tester.slicer().slice_check(unit, by.branch, policy.leaves);
        tester.same_location(unit, &fingerprint, &covering, policy)
    }

    /// Loop-induction bounds check, eliminated wholesale at L1 and above
    pub fn is_induction_guard(&self, unit: &ProgramUnit, check: &ConditionalCheck) -> bool {
        self.level.uses_induction_heuristic()
            && is_induction_guard(unit, check.branch, &self.induction_prefix)
    }
}

fn condition_of(unit: &ProgramUnit, branch: NodeId) -> Option<&Operand> {
    unit.node(branch).and_then(OpNode::condition)
}

/// Value slices of the index operands of a lone address computation
///
/// An address check that slices to exactly one address computation is
/// compared by the indices it applies rather than by the computed address.
fn index_fingerprint(
    tester: &mut EquivalenceTester,
    unit: &ProgramUnit,
    fingerprint: &Fingerprint,
) -> Option<Fingerprint> {
    if fingerprint.len() != 1 {
        return None;
    }
    let node = match fingerprint.iter().next()? {
        Leaf::Node(id) => unit.node(*id)?,
        Leaf::External(_) => return None,
    };
    if node.opcode != Opcode::AddressComputation {
        return None;
    }

    let value = ComparisonPolicy::for_kind(GuardKind::Generic).leaves;
    let mut refined = Fingerprint::new();
    for operand in node.operands.iter().skip(1) {
        let slice = tester.slicer().slice_operand(unit, operand, value);
        refined.extend(&slice);
    }
    Some(refined)
}

/// Block at which a check's guard is decided
///
/// The last conditional branch of the dependency cone other than the
/// check's own branch, else the check's own block.
pub fn effective_block(
    unit: &ProgramUnit,
    check: &ConditionalCheck,
    cone: &[NodeId],
) -> Option<BlockId> {
    cone.iter()
        .rev()
        .filter(|&&id| id != check.branch)
        .filter_map(|&id| unit.node(id))
        .find(|node| node.is_cond_branch())
        .or_else(|| unit.node(check.branch))
        .map(|node| node.block)
}
