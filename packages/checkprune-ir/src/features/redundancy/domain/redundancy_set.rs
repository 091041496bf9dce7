//! Redundancy Set
//!
//! Insert-only record of eliminated sanitizer checks. The first phase to
//! mark a check owns the entry; later marks are ignored.

use crate::shared::models::CheckId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Elimination phase, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// UC subsumes SC, matched through coverage counts
    UserSubsumption,
    /// Earlier SC subsumes later SC, matched through coverage counts
    CoverageSubsumption,
    /// UC or SC subsumes SC, proven by (post-)dominance
    DominanceSubsumption,
}

impl Phase {
    pub const ALL: [Phase; 3] = [
        Phase::UserSubsumption,
        Phase::CoverageSubsumption,
        Phase::DominanceSubsumption,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserSubsumption => "user_subsumption",
            Self::CoverageSubsumption => "coverage_subsumption",
            Self::DominanceSubsumption => "dominance_subsumption",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a check was eliminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundancyEntry {
    /// Count that justified the elimination (0 for static proofs without evidence)
    pub count: u64,
    pub phase: Phase,
    /// Covering check
    pub by: CheckId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedundancySet {
    entries: BTreeMap<CheckId, RedundancyEntry>,
}

impl RedundancySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an elimination; returns `false` if the check was already redundant
    pub fn mark(&mut self, id: CheckId, entry: RedundancyEntry) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, entry);
        true
    }

    pub fn contains(&self, id: CheckId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: CheckId) -> Option<&RedundancyEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in check id order
    pub fn iter(&self) -> impl Iterator<Item = (CheckId, &RedundancyEntry)> + '_ {
        self.entries.iter().map(|(&id, entry)| (id, entry))
    }

    /// Checks eliminated by `phase` or any earlier phase
    pub fn count_through(&self, phase: Phase) -> usize {
        self.entries.values().filter(|e| e.phase <= phase).count()
    }

    /// Sum of justification counts of checks eliminated through `phase`
    pub fn weight_through(&self, phase: Phase) -> u64 {
        self.entries
            .values()
            .filter(|e| e.phase <= phase)
            .fold(0u64, |acc, e| acc.saturating_add(e.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(count: u64, phase: Phase, by: u64) -> RedundancyEntry {
        RedundancyEntry {
            count,
            phase,
            by: CheckId(by),
        }
    }

    #[test]
    fn test_first_mark_wins() {
        let mut set = RedundancySet::new();
        assert!(set.mark(CheckId(1), entry(10, Phase::UserSubsumption, 7)));
        assert!(!set.mark(CheckId(1), entry(3, Phase::DominanceSubsumption, 2)));

        let kept = set.get(CheckId(1)).unwrap();
        assert_eq!(kept.count, 10);
        assert_eq!(kept.phase, Phase::UserSubsumption);
        assert_eq!(kept.by, CheckId(7));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_per_phase_aggregates() {
        let mut set = RedundancySet::new();
        set.mark(CheckId(1), entry(10, Phase::UserSubsumption, 100));
        set.mark(CheckId(2), entry(4, Phase::CoverageSubsumption, 1));
        set.mark(CheckId(3), entry(0, Phase::DominanceSubsumption, 100));
        set.mark(CheckId(4), entry(u64::MAX, Phase::DominanceSubsumption, 2));

        assert_eq!(set.count_through(Phase::UserSubsumption), 1);
        assert_eq!(set.count_through(Phase::CoverageSubsumption), 2);
        assert_eq!(set.count_through(Phase::DominanceSubsumption), 4);

        assert_eq!(set.weight_through(Phase::CoverageSubsumption), 14);
        assert_eq!(set.weight_through(Phase::DominanceSubsumption), u64::MAX);
    }

    #[test]
    fn test_iteration_is_ordered_by_id() {
        let mut set = RedundancySet::new();
        set.mark(CheckId(9), entry(1, Phase::UserSubsumption, 0));
        set.mark(CheckId(2), entry(1, Phase::UserSubsumption, 0));
        let ids: Vec<_> = set.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![2, 9]);
    }
}
