//! Test fixtures: coverage traces, configurations and stock scenarios

use super::builders::{Scenario, ScenarioBuilder};
use checkprune_ir::config::PhaseToggles;
use checkprune_ir::features::coverage::{
    encode_records, ingest_sanitizer, CoverageRecord, Evidence, MemoryTrace,
};
use checkprune_ir::shared::models::{ConditionalCheck, GuardKind};
use checkprune_ir::PruneConfig;
use std::path::{Path, PathBuf};

/// One record per check, `counts[k]` = `(left, right)` of `checks[k]`
pub fn records_for(checks: &[ConditionalCheck], counts: &[(u64, u64)]) -> Vec<CoverageRecord> {
    assert_eq!(checks.len(), counts.len(), "one count pair per check");
    checks
        .iter()
        .zip(counts)
        .map(|(c, &(left, right))| CoverageRecord::new(c.id.0, left, right))
        .collect()
}

/// Write `<dir>/<unit>.<extension>` in trace layout
pub fn write_trace(dir: &Path, unit: &str, extension: &str, records: &[CoverageRecord]) -> PathBuf {
    let path = dir.join(format!("{}.{}", unit, extension));
    let bytes = encode_records(records).expect("encode trace");
    std::fs::write(&path, bytes).expect("write trace");
    path
}

/// Sanitizer trace of a scenario under the default extension
pub fn write_sanitizer_trace(dir: &Path, scenario: &Scenario, counts: &[(u64, u64)]) {
    write_trace(
        dir,
        &scenario.unit.name,
        "scov",
        &records_for(&scenario.sanitizer, counts),
    );
}

/// Sanitizer and user traces of a scenario under the default extensions
pub fn write_traces(
    dir: &Path,
    scenario: &Scenario,
    sanitizer_counts: &[(u64, u64)],
    user_counts: &[(u64, u64)],
) {
    write_sanitizer_trace(dir, scenario, sanitizer_counts);
    write_trace(
        dir,
        &scenario.unit.name,
        "ucov",
        &records_for(&scenario.user, user_counts),
    );
}

/// Default configuration reading traces from `dir`
pub fn traced_config(dir: &Path) -> PruneConfig {
    let mut config = PruneConfig::default();
    config.traces.directory = Some(dir.to_path_buf());
    config
}

pub fn only_phases(user: bool, coverage: bool, dominance: bool) -> PhaseToggles {
    PhaseToggles {
        user_subsumption: user,
        coverage_subsumption: coverage,
        dominance_subsumption: dominance,
    }
}

/// In-memory evidence plus the sanitizer trace for phase 2
pub fn memory_evidence(
    scenario: &Scenario,
    sanitizer_counts: &[(u64, u64)],
    user_counts: Option<&[(u64, u64)]>,
) -> (MemoryTrace, Evidence) {
    let bytes = encode_records(&records_for(&scenario.sanitizer, sanitizer_counts))
        .expect("encode trace");
    let sanitizer = ingest_sanitizer(&MemoryTrace::new(bytes.clone()), &scenario.sanitizer)
        .expect("well-formed trace");
    let evidence = Evidence {
        sanitizer: Some(sanitizer),
        user: user_counts.map(|counts| records_for(&scenario.user, counts)),
    };
    (MemoryTrace::new(bytes), evidence)
}

/// `if (x < 10)` written by the user, then a sanitizer check on the same `x`
///
/// UC id 100, SC id 1.
pub fn guarded_value(name: &str) -> Scenario {
    let mut s = ScenarioBuilder::new(name);
    let p = s.external("p");
    let x = s.read(p);
    s.user_check(100, x, 10);
    s.sanitizer_check(1, GuardKind::Generic, x, 10);
    s.build()
}

/// Two sanitizer checks on the same `x`, no user check
///
/// SC ids 1 and 2, in that order.
pub fn repeated_check(name: &str) -> Scenario {
    let mut s = ScenarioBuilder::new(name);
    let p = s.external("p");
    let x = s.read(p);
    s.sanitizer_check(1, GuardKind::Generic, x, 10);
    s.sanitizer_check(2, GuardKind::Generic, x, 10);
    s.build()
}

/// Sanitizer checks on `*p`, `*q` and `*r`: nothing is redundant
pub fn unrelated_checks(name: &str) -> Scenario {
    let mut s = ScenarioBuilder::new(name);
    for (id, ptr) in [(1, "p"), (2, "q"), (3, "r")] {
        let e = s.external(ptr);
        let v = s.read(e);
        s.sanitizer_check(id, GuardKind::Generic, v, 10);
    }
    s.build()
}
