//! Pruning pipeline
//!
//! Runs one unit at a time:
//!
//! 1. Validate the classifier's checks against the unit
//! 2. Load coverage evidence (absent or mismatched traces degrade to static)
//! 3. Phases 1-3 into one Redundancy Set
//! 4. Cost every sanitizer check
//! 5. Rewrite the eliminated checks
//!
//! Units share nothing but the report stream.

use super::report::{Elimination, EvidenceMode, UnitReport, Warning};
use super::writer::ReportWriter;
use crate::config::{PruneConfig, Validatable};
use crate::errors::{PruneError, Result};
use crate::features::cost_analysis::{CheckCost, CheckDetail, CostAnalyzer, CostRanking, Verdict};
use crate::features::coverage::{
    ingest_sanitizer, read_records, Evidence, EvidenceError, FileTrace, TraceSource,
};
use crate::features::dominance::DominanceOracle;
use crate::features::equivalence::EquivalenceTester;
use crate::features::redundancy::{
    CheckInventory, Phase, RedundancyEngine, RedundancySet, SubsumptionMatcher,
};
use crate::features::rewrite::{eliminate, RewriteOutcome};
use crate::shared::models::{CheckId, ConditionalCheck, ProgramUnit};
use crate::shared::ports::{CheckClassifier, CostOracle};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, error, info, warn};

/// Result of one unit in a batch
#[derive(Debug)]
pub enum UnitOutcome {
    Completed(UnitReport),
    /// Contract violation; the unit may be partially rewritten
    Aborted { unit: String, error: PruneError },
}

impl UnitOutcome {
    pub fn report(&self) -> Option<&UnitReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Aborted { .. } => None,
        }
    }
}

/// Evidence of one unit plus the sanitizer trace kept for re-reading
struct LoadedEvidence {
    evidence: Evidence,
    sanitizer_trace: Option<FileTrace>,
    warnings: Vec<Warning>,
}

pub struct PrunePipeline {
    config: PruneConfig,
}

impl PrunePipeline {
    pub fn new(config: PruneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PruneConfig {
        &self.config
    }

    /// Process one unit, loading traces from the configured directory
    pub fn run_unit(
        &self,
        unit: &mut ProgramUnit,
        classifier: &dyn CheckClassifier,
        oracle: &dyn CostOracle,
    ) -> Result<UnitReport> {
        let checks = self.inventory(unit, classifier)?;
        let loaded = self.load_evidence(unit, &checks);
        let sanitizer_trace = loaded.sanitizer_trace.as_ref().map(|t| t as &dyn TraceSource);
        self.analyze(
            unit,
            classifier,
            oracle,
            checks,
            loaded.evidence,
            sanitizer_trace,
            loaded.warnings,
        )
    }

    /// Process one unit with evidence supplied by the caller
    ///
    /// `sanitizer_trace` is re-read by phase 2; without it phase 2 is skipped.
    pub fn run_unit_with_evidence(
        &self,
        unit: &mut ProgramUnit,
        classifier: &dyn CheckClassifier,
        oracle: &dyn CostOracle,
        evidence: Evidence,
        sanitizer_trace: Option<&dyn TraceSource>,
    ) -> Result<UnitReport> {
        let checks = self.inventory(unit, classifier)?;
        self.analyze(
            unit,
            classifier,
            oracle,
            checks,
            evidence,
            sanitizer_trace,
            Vec::new(),
        )
    }

    /// Process units in order; an aborted unit does not stop the batch
    ///
    /// Completed units are appended to the configured report stream.
    pub fn run_units<'u>(
        &self,
        units: impl IntoIterator<Item = &'u mut ProgramUnit>,
        classifier: &dyn CheckClassifier,
        oracle: &dyn CostOracle,
    ) -> Result<Vec<UnitOutcome>> {
        let mut writer = match &self.config.report.path {
            Some(path) => Some(ReportWriter::append_to(path, self.config.report.format)?),
            None => None,
        };

        let mut outcomes = Vec::new();
        for unit in units {
            match self.run_unit(unit, classifier, oracle) {
                Ok(report) => {
                    if let Some(writer) = writer.as_mut() {
                        writer.write(&report)?;
                    }
                    outcomes.push(UnitOutcome::Completed(report));
                }
                Err(e) if e.is_contract_violation() => {
                    error!(unit = %unit.name, error = %e, "unit aborted");
                    outcomes.push(UnitOutcome::Aborted {
                        unit: unit.name.clone(),
                        error: e,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outcomes)
    }

    /// Collect and validate the classifier's checks
    fn inventory(
        &self,
        unit: &ProgramUnit,
        classifier: &dyn CheckClassifier,
    ) -> Result<CheckInventory> {
        let sanitizer = classifier.sanitizer_checks(unit);
        let user = classifier.user_checks(unit);

        let mut seen = FxHashSet::default();
        for check in sanitizer.iter().chain(&user) {
            let node = unit.node(check.branch).ok_or_else(|| {
                PruneError::structural(check.id, check.branch, "branch node not in unit")
            })?;
            if !node.is_cond_branch() {
                return Err(PruneError::structural(
                    check.id,
                    check.branch,
                    "not a conditional branch",
                ));
            }
            if !seen.insert(check.id) {
                return Err(PruneError::structural(
                    check.id,
                    check.branch,
                    "duplicate check id",
                ));
            }
        }

        let cones = sanitizer
            .iter()
            .map(|sc| classifier.dependency_cone(unit, sc))
            .collect();
        Ok(CheckInventory {
            sanitizer,
            user,
            cones,
        })
    }

    fn load_evidence(&self, unit: &ProgramUnit, checks: &CheckInventory) -> LoadedEvidence {
        let mut loaded = LoadedEvidence {
            evidence: Evidence::none(),
            sanitizer_trace: None,
            warnings: Vec::new(),
        };
        let Some(sanitizer_path) = self.config.traces.sanitizer_trace(&unit.name) else {
            debug!(unit = %unit.name, "no trace directory, static analysis only");
            return loaded;
        };

        let trace = FileTrace::new(sanitizer_path);
        match ingest_sanitizer(&trace, &checks.sanitizer) {
            Ok(sanitizer) => {
                loaded.evidence.sanitizer = Some(sanitizer);
                loaded.sanitizer_trace = Some(trace);
            }
            Err(e) => {
                note_evidence_error(&mut loaded.warnings, &unit.name, &trace, e);
                return loaded;
            }
        }

        if let Some(user_path) = self.config.traces.user_trace(&unit.name) {
            let trace = FileTrace::new(user_path);
            match read_records(&trace, &checks.user) {
                Ok(records) => loaded.evidence.user = Some(records),
                Err(e) => note_evidence_error(&mut loaded.warnings, &unit.name, &trace, e),
            }
        }
        loaded
    }

    #[allow(clippy::too_many_arguments)]
    fn analyze(
        &self,
        unit: &mut ProgramUnit,
        classifier: &dyn CheckClassifier,
        oracle: &dyn CostOracle,
        checks: CheckInventory,
        evidence: Evidence,
        sanitizer_trace: Option<&dyn TraceSource>,
        mut warnings: Vec<Warning>,
    ) -> Result<UnitReport> {
        let phases = self.config.phases;
        let mut engine = RedundancyEngine::new(
            SubsumptionMatcher::new(self.config.level, self.config.limits.induction_prefix.clone()),
            EquivalenceTester::new(self.config.limits.max_match_depth),
        );
        let mut set = RedundancySet::new();

        if let (Some(sanitizer), Some(user)) = (&evidence.sanitizer, &evidence.user) {
            if phases.user_subsumption {
                let n = engine.user_phase(unit, &checks, user, &sanitizer.table, &mut set);
                debug!(unit = %unit.name, eliminated = n, "user subsumption done");
            }
        }

        if let (Some(sanitizer), Some(trace)) = (&evidence.sanitizer, sanitizer_trace) {
            if phases.coverage_subsumption {
                match engine.coverage_phase(unit, &checks, trace, &sanitizer.table, &mut set) {
                    Ok(n) => debug!(unit = %unit.name, eliminated = n, "coverage subsumption done"),
                    Err(e) => {
                        warn!(unit = %unit.name, error = %e, "coverage subsumption skipped");
                        warnings.push(Warning::CoverageSkipped {
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        if phases.dominance_subsumption {
            let dominance = DominanceOracle::build(unit);
            let n = engine.dominance_phase(unit, &checks, &dominance, &evidence, &mut set);
            debug!(unit = %unit.name, eliminated = n, "dominance subsumption done");
        }

        let hits = engine.tester().depth_limit_hits();
        if hits > 0 {
            debug!(unit = %unit.name, hits, "comparisons cut at the depth limit");
        }

        // cost of every sanitizer check against the unmodified unit
        let analyzer = CostAnalyzer::new(oracle);
        let costs: Vec<CheckCost> = checks
            .sanitizer
            .iter()
            .zip(&checks.cones)
            .map(|(sc, cone)| analyzer.check_cost(unit, sc.id, cone, evidence.total_of(sc.id)))
            .collect();
        let ranking = analyzer.rank(unit, &costs);
        let total_cost_after = costs
            .iter()
            .filter(|c| !set.contains(c.id))
            .fold(0u64, |acc, c| acc.saturating_add(c.cost));

        let user_ids: FxHashSet<CheckId> = checks.user.iter().map(|uc| uc.id).collect();
        let detail = self.inspect(&unit.name, &ranking, &set, &user_ids);

        let eliminated = self.rewrite(unit, classifier, &checks, &set, &mut warnings)?;

        let num_checks = checks.sanitizer.len();
        let weight = evidence.sanitizer.as_ref().map_or(0, |s| s.weight);
        let report = UnitReport {
            unit: unit.name.clone(),
            num_user_checks: checks.user.len(),
            num_checks,
            after_phase1: num_checks - set.count_through(Phase::UserSubsumption),
            after_phase2: num_checks - set.count_through(Phase::CoverageSubsumption),
            after_phase3: num_checks - set.count_through(Phase::DominanceSubsumption),
            weight,
            weight_after_phase1: weight.saturating_sub(set.weight_through(Phase::UserSubsumption)),
            weight_after_phase2: weight
                .saturating_sub(set.weight_through(Phase::CoverageSubsumption)),
            weight_after_phase3: weight
                .saturating_sub(set.weight_through(Phase::DominanceSubsumption)),
            total_cost: ranking.total_cost(),
            total_cost_after,
            evidence: if evidence.is_dynamic() {
                EvidenceMode::Dynamic
            } else {
                EvidenceMode::StaticOnly
            },
            warnings,
            eliminated,
            detail,
        };

        info!(
            unit = %report.unit,
            checks = report.num_checks,
            live = report.after_phase3,
            evidence = ?report.evidence,
            warnings = report.warnings.len(),
            "unit processed"
        );
        Ok(report)
    }

    fn inspect(
        &self,
        unit: &str,
        ranking: &CostRanking,
        set: &RedundancySet,
        user_ids: &FxHashSet<CheckId>,
    ) -> Option<CheckDetail> {
        let target = self.config.report.inspect.as_ref()?;
        if !target.applies_to(unit) {
            return None;
        }
        let verdict = match set.get(target.check_id) {
            None => Verdict::Live,
            Some(entry) if user_ids.contains(&entry.by) => Verdict::RedundantWithUserCheck,
            Some(_) => Verdict::RedundantWithSanitizerCheck,
        };
        ranking.detail(target.check_id, verdict)
    }

    /// Fold every eliminated check, in check id order
    fn rewrite(
        &self,
        unit: &mut ProgramUnit,
        classifier: &dyn CheckClassifier,
        checks: &CheckInventory,
        set: &RedundancySet,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<Elimination>> {
        let by_id: FxHashMap<CheckId, &ConditionalCheck> =
            checks.sanitizer.iter().map(|sc| (sc.id, sc)).collect();

        let plan: Vec<_> = set
            .iter()
            .filter_map(|(id, entry)| by_id.get(&id).map(|sc| (*sc, *entry)))
            .map(|(sc, entry)| (sc, entry, classifier.regular_successor(unit, sc)))
            .collect();

        let mut eliminated = Vec::with_capacity(plan.len());
        for (sc, entry, successor) in plan {
            let rewrite = eliminate(unit, sc, successor)?;
            if rewrite == RewriteOutcome::Ambiguous {
                warnings.push(Warning::AmbiguousOutcome { check: sc.id });
            }
            eliminated.push(Elimination {
                check: sc.id,
                by: entry.by,
                phase: entry.phase,
                count: entry.count,
                rewrite,
            });
        }
        Ok(eliminated)
    }
}

fn note_evidence_error(
    warnings: &mut Vec<Warning>,
    unit: &str,
    trace: &FileTrace,
    error: EvidenceError,
) {
    let path = trace.path();
    match error {
        EvidenceError::Absent { .. } => {
            debug!(unit, trace = %path.display(), "trace absent");
        }
        other => {
            warn!(unit, trace = %path.display(), error = %other, "trace ignored");
            warnings.push(Warning::MismatchedEvidence {
                trace: path.display().to_string(),
                reason: other.to_string(),
            });
        }
    }
}
