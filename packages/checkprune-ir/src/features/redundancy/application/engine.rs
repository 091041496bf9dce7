/*
 * Redundancy Engine
 *
 * Three elimination phases over one program unit, all feeding the same
 * Redundancy Set:
 *
 * 1. UC subsumption: user check counts select pattern table buckets;
 *    SCs in the bucket that the UC covers are eliminated.
 * 2. Coverage subsumption: each SC is compared with SCs enumerated
 *    before it that share its total and one half-count.
 * 3. Dominance subsumption: UC/SC and SC/SC pairs related by dominance
 *    or post-dominance, no counts needed.
 *
 * A check already in the set is never compared again as a candidate.
 * The program is not modified here; rewrites happen after all phases.
 */

use crate::features::coverage::{
    read_records, CoverageRecord, Evidence, EvidenceError, PatternEntry, PatternTable, TraceSource,
};
use crate::features::dominance::DominanceOracle;
use crate::features::equivalence::EquivalenceTester;
use crate::features::redundancy::domain::{
    effective_block, EvidenceSource, Phase, RedundancyEntry, RedundancySet, SubsumptionMatcher,
};
use crate::shared::models::{BlockId, ConditionalCheck, NodeId, ProgramUnit};
use tracing::{debug, trace};

/// Checks of one unit, in classifier enumeration order
#[derive(Debug, Clone, Default)]
pub struct CheckInventory {
    pub sanitizer: Vec<ConditionalCheck>,
    pub user: Vec<ConditionalCheck>,
    /// Dependency cone of each sanitizer check, parallel to `sanitizer`
    pub cones: Vec<Vec<NodeId>>,
}

impl CheckInventory {
    fn sanitizer_at(&self, ordinal: usize) -> Option<&ConditionalCheck> {
        self.sanitizer.get(ordinal)
    }
}

pub struct RedundancyEngine {
    matcher: SubsumptionMatcher,
    tester: EquivalenceTester,
}

impl RedundancyEngine {
    pub fn new(matcher: SubsumptionMatcher, tester: EquivalenceTester) -> Self {
        Self { matcher, tester }
    }

    pub fn matcher(&self) -> &SubsumptionMatcher {
        &self.matcher
    }

    pub fn tester(&self) -> &EquivalenceTester {
        &self.tester
    }

    /// Phase 1: sanitizer checks covered by user checks with matching counts
    ///
    /// Each user record probes the table by its total first, then by
    /// either half-count against one-sided entries. Returns the number of
    /// checks eliminated.
    pub fn user_phase(
        &mut self,
        unit: &ProgramUnit,
        checks: &CheckInventory,
        user_records: &[CoverageRecord],
        table: &PatternTable,
        set: &mut RedundancySet,
    ) -> usize {
        let mut eliminated = 0;

        for (uc, record) in checks.user.iter().zip(user_records) {
            let total = record.total();
            if total > 0 && table.contains(total) {
                for entry in table.bucket(total) {
                    let Some(sc) = checks.sanitizer_at(entry.ordinal) else {
                        continue;
                    };
                    if set.contains(sc.id) {
                        continue;
                    }
                    let covered = self.matcher.is_induction_guard(unit, sc)
                        || (record.same_split(entry.left, entry.right)
                            && self.matcher.subsumed(
                                &mut self.tester,
                                unit,
                                sc,
                                uc,
                                EvidenceSource::Coverage,
                            ));
                    if covered && mark(set, sc, uc, total, Phase::UserSubsumption) {
                        eliminated += 1;
                    }
                }
            } else if record.left > 0 && table.contains(record.left) {
                eliminated += self.one_sided(unit, checks, uc, table.bucket(record.left), record.left, set);
            } else if record.right > 0 && table.contains(record.right) {
                eliminated +=
                    self.one_sided(unit, checks, uc, table.bucket(record.right), record.right, set);
            }
        }

        eliminated
    }

    /// SCs that only ever took one direction, matched by one UC half-count
    fn one_sided(
        &mut self,
        unit: &ProgramUnit,
        checks: &CheckInventory,
        uc: &ConditionalCheck,
        bucket: &[PatternEntry],
        count: u64,
        set: &mut RedundancySet,
    ) -> usize {
        let mut eliminated = 0;
        for entry in bucket.iter().filter(|e| e.is_one_sided()) {
            let Some(sc) = checks.sanitizer_at(entry.ordinal) else {
                continue;
            };
            if set.contains(sc.id) {
                continue;
            }
            if self
                .matcher
                .subsumed(&mut self.tester, unit, sc, uc, EvidenceSource::Coverage)
                && mark(set, sc, uc, count, Phase::UserSubsumption)
            {
                eliminated += 1;
            }
        }
        eliminated
    }

    /// Phase 2: sanitizer checks covered by earlier sanitizer checks
    ///
    /// The trace is read again from the start and validated. Candidates
    /// are compared against the original table, restricted to checks
    /// enumerated before them, so an equivalent pair loses only its later
    /// member.
    pub fn coverage_phase(
        &mut self,
        unit: &ProgramUnit,
        checks: &CheckInventory,
        trace: &dyn TraceSource,
        table: &PatternTable,
        set: &mut RedundancySet,
    ) -> Result<usize, EvidenceError> {
        let records = read_records(trace, &checks.sanitizer)?;
        let mut eliminated = 0;

        for (ordinal, (sc, record)) in checks.sanitizer.iter().zip(&records).enumerate() {
            let total = record.total();
            if total == 0 || set.contains(sc.id) {
                continue;
            }
            for entry in table.bucket(total) {
                if entry.ordinal >= ordinal || entry.id == sc.id {
                    continue;
                }
                if record.left != entry.left && record.right != entry.left {
                    continue;
                }
                let Some(earlier) = checks.sanitizer_at(entry.ordinal) else {
                    continue;
                };
                if self
                    .matcher
                    .subsumed(&mut self.tester, unit, sc, earlier, EvidenceSource::Coverage)
                {
                    if mark(set, sc, earlier, total, Phase::CoverageSubsumption) {
                        eliminated += 1;
                    }
                    break;
                }
            }
        }

        Ok(eliminated)
    }

    /// Phase 3: subsumption proven by dominance between blocks
    ///
    /// UC/SC pairs use the checks' own blocks. SC/SC pairs use effective
    /// blocks, and the covering check must itself still be live.
    pub fn dominance_phase(
        &mut self,
        unit: &ProgramUnit,
        checks: &CheckInventory,
        dominance: &DominanceOracle,
        evidence: &Evidence,
        set: &mut RedundancySet,
    ) -> usize {
        let mut eliminated = 0;
        let own: Vec<Option<BlockId>> = checks
            .sanitizer
            .iter()
            .map(|sc| unit.node(sc.branch).map(|n| n.block))
            .collect();

        for uc in &checks.user {
            let Some(uc_block) = unit.node(uc.branch).map(|n| n.block) else {
                continue;
            };
            for (sc, sc_block) in checks.sanitizer.iter().zip(&own) {
                let Some(sc_block) = *sc_block else {
                    continue;
                };
                if set.contains(sc.id) {
                    continue;
                }
                if !(dominance.dominates(uc_block, sc_block)
                    || dominance.post_dominates(uc_block, sc_block))
                {
                    continue;
                }
                if self
                    .matcher
                    .subsumed(&mut self.tester, unit, sc, uc, EvidenceSource::Dominance)
                    && mark(set, sc, uc, evidence.total_of(sc.id), Phase::DominanceSubsumption)
                {
                    eliminated += 1;
                }
            }
        }

        let effective: Vec<Option<BlockId>> = checks
            .sanitizer
            .iter()
            .enumerate()
            .map(|(i, sc)| {
                let cone = checks.cones.get(i).map(Vec::as_slice).unwrap_or(&[]);
                effective_block(unit, sc, cone)
            })
            .collect();

        for (i, sc1) in checks.sanitizer.iter().enumerate() {
            let Some(b1) = effective[i] else {
                continue;
            };
            for (j, sc2) in checks.sanitizer.iter().enumerate() {
                if set.contains(sc1.id) {
                    break;
                }
                if i == j || sc1.id == sc2.id || set.contains(sc2.id) {
                    continue;
                }
                let Some(b2) = effective[j] else {
                    continue;
                };
                let related = if dominance.dominates(b2, b1) {
                    true
                } else {
                    !dominance.dominates(b1, b2) && dominance.post_dominates(b2, b1)
                };
                if !related {
                    continue;
                }
                if self
                    .matcher
                    .subsumed(&mut self.tester, unit, sc1, sc2, EvidenceSource::Dominance)
                    && mark(set, sc1, sc2, evidence.total_of(sc1.id), Phase::DominanceSubsumption)
                {
                    eliminated += 1;
                }
            }
        }

        eliminated
    }
}

fn mark(
    set: &mut RedundancySet,
    check: &ConditionalCheck,
    by: &ConditionalCheck,
    count: u64,
    phase: Phase,
) -> bool {
    let inserted = set.mark(
        check.id,
        RedundancyEntry {
            count,
            phase,
            by: by.id,
        },
    );
    if inserted {
        debug!(check = %check.id, by = %by.id, count, %phase, "check eliminated");
    } else {
        trace!(check = %check.id, %phase, "check already eliminated");
    }
    inserted
}
