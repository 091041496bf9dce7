//! Rewrite Applier
//!
//! Folds a redundant check's condition to the constant that always
//! selects its non-failure successor. This is the only mutation made to a
//! program unit.

use crate::errors::{PruneError, Result};
use crate::shared::models::{ConditionalCheck, Constant, Operand, ProgramUnit, RegularSuccessor};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Result of one elimination request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteOutcome {
    /// Condition replaced by `value`
    Rewritten { value: bool },
    /// Condition already was the target constant
    AlreadyConstant,
    /// Non-failure successor unknown; left intact
    Ambiguous,
}

/// Constant that routes a branch to its regular successor
///
/// `true` selects the left target, `false` the right one.
pub fn constant_for(successor: RegularSuccessor) -> Option<bool> {
    match successor {
        RegularSuccessor::Left => Some(true),
        RegularSuccessor::Right => Some(false),
        RegularSuccessor::Unknown => None,
    }
}

/// Rewrite `check` so control always reaches its regular successor
pub fn eliminate(
    unit: &mut ProgramUnit,
    check: &ConditionalCheck,
    successor: RegularSuccessor,
) -> Result<RewriteOutcome> {
    let unit_name = unit.name.clone();
    let node = unit
        .node_mut(check.branch)
        .ok_or_else(|| PruneError::structural(check.id, check.branch, "branch node not in unit"))?;
    if !node.is_cond_branch() {
        return Err(PruneError::structural(
            check.id,
            check.branch,
            "not a conditional branch",
        ));
    }

    let Some(value) = constant_for(successor) else {
        warn!(unit = %unit_name, check = %check.id, "regular successor unknown, check left intact");
        return Ok(RewriteOutcome::Ambiguous);
    };

    let folded = Operand::Constant(Constant::Bool(value));
    if node.operands.first() == Some(&folded) {
        trace!(check = %check.id, "check already folded");
        return Ok(RewriteOutcome::AlreadyConstant);
    }
    match node.operands.first_mut() {
        Some(condition) => *condition = folded,
        None => node.operands.push(folded),
    }
    Ok(RewriteOutcome::Rewritten { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{GuardKind, Opcode, UnitBuilder};

    fn unit_with_check() -> (ProgramUnit, ConditionalCheck) {
        let mut b = UnitBuilder::new("rewrite");
        let f = b.procedure("main");
        let entry = b.block(f);
        let ok = b.block(f);
        let fail = b.block(f);
        let p = b.external("p");
        let cmp = b.op(entry, Opcode::generic("icmp.ne"), vec![p.into()]);
        let br = b.branch(entry, cmp, ok, fail);
        (b.build(), ConditionalCheck::sanitizer(1, br, GuardKind::Generic))
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let (mut unit, check) = unit_with_check();

        let first = eliminate(&mut unit, &check, RegularSuccessor::Left).unwrap();
        assert_eq!(first, RewriteOutcome::Rewritten { value: true });
        let after_first = unit.clone();

        let second = eliminate(&mut unit, &check, RegularSuccessor::Left).unwrap();
        assert_eq!(second, RewriteOutcome::AlreadyConstant);
        assert_eq!(unit, after_first);
    }

    #[test]
    fn test_right_successor_folds_to_false() {
        let (mut unit, check) = unit_with_check();
        eliminate(&mut unit, &check, RegularSuccessor::Right).unwrap();
        assert_eq!(
            unit.node(check.branch).unwrap().condition(),
            Some(&Operand::Constant(Constant::Bool(false)))
        );
    }

    #[test]
    fn test_unknown_successor_leaves_check() {
        let (mut unit, check) = unit_with_check();
        let before = unit.clone();
        let outcome = eliminate(&mut unit, &check, RegularSuccessor::Unknown).unwrap();
        assert_eq!(outcome, RewriteOutcome::Ambiguous);
        assert_eq!(unit, before);
    }

    #[test]
    fn test_non_branch_is_contract_violation() {
        let (mut unit, check) = unit_with_check();
        let bogus = ConditionalCheck {
            branch: crate::shared::models::NodeId(0),
            ..check
        };
        // node 0 is the comparison
        let err = eliminate(&mut unit, &bogus, RegularSuccessor::Left).unwrap_err();
        assert!(err.is_contract_violation());
    }
}
