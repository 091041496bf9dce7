//! Coverage domain models
//!
//! A coverage record holds the two outcome counts of one check. The
//! pattern table buckets sanitizer checks by total count so that the
//! expensive structural comparison only runs between checks with the same
//! dynamic behavior.

use crate::shared::models::{CheckId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Outcome counts of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRecord {
    pub id: CheckId,
    pub left: u64,
    pub right: u64,
}

impl CoverageRecord {
    pub fn new(id: u64, left: u64, right: u64) -> Self {
        Self {
            id: CheckId(id),
            left,
            right,
        }
    }

    /// Times the check executed
    pub fn total(&self) -> u64 {
        self.left.saturating_add(self.right)
    }

    /// Same outcome split, in either order
    pub fn same_split(&self, left: u64, right: u64) -> bool {
        (self.left == left && self.right == right) || (self.left == right && self.right == left)
    }
}

/// Sanitizer check indexed under its total count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternEntry {
    pub id: CheckId,
    pub left: u64,
    pub right: u64,
    pub branch: NodeId,
    /// Position in the classifier's enumeration
    pub ordinal: usize,
}

impl PatternEntry {
    pub fn is_one_sided(&self) -> bool {
        self.left == 0 || self.right == 0
    }
}

/// `count_total -> entries`, in enumeration order within a bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTable {
    buckets: BTreeMap<u64, Vec<PatternEntry>>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, total: u64, entry: PatternEntry) {
        self.buckets.entry(total).or_default().push(entry);
    }

    pub fn contains(&self, total: u64) -> bool {
        self.buckets.contains_key(&total)
    }

    pub fn bucket(&self, total: u64) -> &[PatternEntry] {
        self.buckets.get(&total).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn totals(&self) -> impl Iterator<Item = u64> + '_ {
        self.buckets.keys().copied()
    }
}

/// Sanitizer-side evidence of one unit
#[derive(Debug, Clone, Default)]
pub struct SanitizerEvidence {
    /// One record per sanitizer check, in enumeration order
    pub records: Vec<CoverageRecord>,
    pub table: PatternTable,
    pub num_checks: usize,
    /// Sum of all totals
    pub weight: u64,
}

impl SanitizerEvidence {
    pub fn total_of(&self, id: CheckId) -> Option<u64> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .map(CoverageRecord::total)
    }
}

/// Dynamic evidence available to one run
#[derive(Debug, Clone, Default)]
pub struct Evidence {
    pub sanitizer: Option<SanitizerEvidence>,
    /// One record per user check, in enumeration order
    pub user: Option<Vec<CoverageRecord>>,
}

impl Evidence {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_dynamic(&self) -> bool {
        self.sanitizer.is_some()
    }

    /// Dynamic count of a sanitizer check, 0 without evidence
    pub fn total_of(&self, id: CheckId) -> u64 {
        self.sanitizer
            .as_ref()
            .and_then(|s| s.total_of(id))
            .unwrap_or(0)
    }
}

/// Why a trace could not serve as evidence
///
/// Always recovered by the pipeline: the unit then runs without dynamic
/// evidence.
#[derive(Debug, Error)]
pub enum EvidenceError {
    #[error("coverage trace not found: {}", path.display())]
    Absent { path: PathBuf },

    #[error("coverage trace truncated: expected {expected} records, read {read}")]
    Truncated { expected: usize, read: usize },

    #[error("coverage trace has records beyond the {expected} enumerated checks")]
    TrailingRecords { expected: usize },

    #[error("coverage record {position} has id {found}, expected {expected}")]
    IdMismatch {
        position: usize,
        expected: CheckId,
        found: CheckId,
    },

    #[error("coverage trace I/O error: {0}")]
    Io(#[from] std::io::Error),
}
