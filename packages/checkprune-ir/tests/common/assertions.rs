//! Custom assertions for pruning results

use checkprune_ir::features::redundancy::Phase;
use checkprune_ir::pipeline::Elimination;
use checkprune_ir::shared::models::{CheckId, ConditionalCheck, Constant, Operand, ProgramUnit};
use checkprune_ir::UnitReport;
use std::collections::BTreeSet;

fn elimination(report: &UnitReport, id: u64) -> Option<&Elimination> {
    report.eliminated.iter().find(|e| e.check == CheckId(id))
}

/// `id` was eliminated by `by` in `phase`
pub fn assert_eliminated(report: &UnitReport, id: u64, by: u64, phase: Phase) -> Elimination {
    let e = elimination(report, id).unwrap_or_else(|| {
        panic!(
            "check #{} should be eliminated in {}; eliminated: {:?}",
            id, report.unit, report.eliminated
        )
    });
    assert_eq!(e.by, CheckId(by), "check #{} covered by the wrong check", id);
    assert_eq!(e.phase, phase, "check #{} eliminated in the wrong phase", id);
    *e
}

pub fn assert_live(report: &UnitReport, id: u64) {
    if let Some(e) = elimination(report, id) {
        panic!("check #{} should be live in {}, but {:?}", id, report.unit, e);
    }
}

/// Branch condition of `check` is the constant `value`
pub fn assert_folded(unit: &ProgramUnit, check: &ConditionalCheck, value: bool) {
    let node = unit.node(check.branch).expect("branch node");
    assert_eq!(
        node.operands.first(),
        Some(&Operand::Constant(Constant::Bool(value))),
        "check {} not folded to {}",
        check.id,
        value
    );
}

/// Branch condition of `check` is not a constant
pub fn assert_unfolded(unit: &ProgramUnit, check: &ConditionalCheck) {
    let node = unit.node(check.branch).expect("branch node");
    assert!(
        node.operands.first().map_or(false, |op| !op.is_constant()),
        "check {} unexpectedly folded",
        check.id
    );
}

pub fn eliminated_ids(report: &UnitReport) -> BTreeSet<CheckId> {
    report.eliminated.iter().map(|e| e.check).collect()
}

/// Every check eliminated in `smaller` is also eliminated in `larger`
pub fn assert_monotone(smaller: &UnitReport, larger: &UnitReport) {
    let a = eliminated_ids(smaller);
    let b = eliminated_ids(larger);
    assert!(
        a.is_subset(&b),
        "more phases eliminated fewer checks: {:?} not within {:?}",
        a,
        b
    );
}
