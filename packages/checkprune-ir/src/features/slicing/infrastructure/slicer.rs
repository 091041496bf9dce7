/*
 * Dependency Slicer
 *
 * Backward slicing over operand edges, stopping at leaf classes.
 * Fingerprints are memoized per (root, policy): the equivalence tester
 * re-slices the same address operands many times per unit.
 *
 * Cached results are only valid for the unit they were computed on and
 * only until it is rewritten. Use one slicer per unit run.
 */

use crate::features::slicing::domain::{Fingerprint, Leaf, LeafPolicy};
use crate::shared::models::{NodeId, OpNode, Opcode, Operand, ProgramUnit};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeSet, VecDeque};

/// Memoizing backward slicer
#[derive(Debug, Default)]
pub struct Slicer {
    cache: FxHashMap<(NodeId, LeafPolicy), Fingerprint>,
    cache_hits: u64,
    cache_misses: u64,
}

impl Slicer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint of a check: slicing starts at the branch condition
    pub fn slice_check(
        &mut self,
        unit: &ProgramUnit,
        branch: NodeId,
        policy: LeafPolicy,
    ) -> Fingerprint {
        match unit.node(branch).and_then(OpNode::condition) {
            Some(condition) => self.slice_operand(unit, condition, policy),
            None => Fingerprint::new(),
        }
    }

    /// Fingerprint of an operand edge
    ///
    /// Constants slice to nothing, externals to themselves.
    pub fn slice_operand(
        &mut self,
        unit: &ProgramUnit,
        operand: &Operand,
        policy: LeafPolicy,
    ) -> Fingerprint {
        match operand {
            Operand::Node(id) => self.slice(unit, *id, policy),
            Operand::External(ext) => Fingerprint::singleton(Leaf::External(*ext)),
            Operand::Constant(_) => Fingerprint::new(),
        }
    }

    /// Backward slice rooted at `root`
    ///
    /// A root that is itself a leaf slices to `{root}`.
    pub fn slice(&mut self, unit: &ProgramUnit, root: NodeId, policy: LeafPolicy) -> Fingerprint {
        if let Some(hit) = self.cache.get(&(root, policy)) {
            self.cache_hits += 1;
            return hit.clone();
        }
        self.cache_misses += 1;

        let fingerprint = backward_leaves(unit, root, policy);
        self.cache.insert((root, policy), fingerprint.clone());
        fingerprint
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> SlicerCacheStats {
        let total = self.cache_hits + self.cache_misses;
        let hit_rate = if total > 0 {
            self.cache_hits as f64 / total as f64
        } else {
            0.0
        };

        SlicerCacheStats {
            size: self.cache.len(),
            hits: self.cache_hits,
            misses: self.cache_misses,
            hit_rate,
        }
    }

    /// Drop every memoized fingerprint
    pub fn clear(&mut self) -> usize {
        let count = self.cache.len();
        self.cache.clear();
        count
    }
}

fn backward_leaves(unit: &ProgramUnit, root: NodeId, policy: LeafPolicy) -> Fingerprint {
    let mut fingerprint = Fingerprint::new();
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut worklist: VecDeque<NodeId> = VecDeque::new();
    worklist.push_back(root);

    while let Some(id) = worklist.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = unit.node(id) else {
            continue;
        };

        if matches!(node.opcode, Opcode::Constant) {
            continue;
        }
        if policy.is_leaf(node) {
            fingerprint.insert(Leaf::Node(id));
            continue;
        }

        for operand in &node.operands {
            match operand {
                Operand::Node(dep) => {
                    if !visited.contains(dep) {
                        worklist.push_back(*dep);
                    }
                }
                Operand::External(ext) => {
                    fingerprint.insert(Leaf::External(*ext));
                }
                Operand::Constant(_) => {}
            }
        }
    }

    fingerprint
}

/// Control merges reached from `start` when every non-merge operation is
/// expanded (memory reads and address computations included)
pub fn merge_frontier(unit: &ProgramUnit, start: &Operand) -> BTreeSet<NodeId> {
    let mut merges = BTreeSet::new();
    let Some(root) = start.as_node() else {
        return merges;
    };

    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut worklist = vec![root];
    while let Some(id) = worklist.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = unit.node(id) else {
            continue;
        };
        if node.opcode.is_merge() {
            merges.insert(id);
            continue;
        }
        worklist.extend(node.node_operands().filter(|dep| !visited.contains(dep)));
    }
    merges
}

/// Slicer cache statistics
#[derive(Debug, Clone)]
pub struct SlicerCacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
