//! Slicing domain models
//!
//! A fingerprint is the set of leaves reached by slicing backwards from a
//! value. Constants never appear in a fingerprint.

use crate::shared::models::{ExternalId, GuardKind, NodeId, OpNode, Opcode};
use std::collections::btree_set;
use std::collections::BTreeSet;

/// Terminal element of a fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Leaf {
    Node(NodeId),
    External(ExternalId),
}

impl Leaf {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Leaf::Node(id) => Some(*id),
            Leaf::External(_) => None,
        }
    }
}

/// Set of slicing leaves
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    leaves: BTreeSet<Leaf>,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(leaf: Leaf) -> Self {
        let mut fp = Self::new();
        fp.insert(leaf);
        fp
    }

    pub fn insert(&mut self, leaf: Leaf) -> bool {
        self.leaves.insert(leaf)
    }

    /// Union in place
    pub fn extend(&mut self, other: &Fingerprint) {
        self.leaves.extend(other.leaves.iter().copied());
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn contains(&self, leaf: &Leaf) -> bool {
        self.leaves.contains(leaf)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Leaf> {
        self.leaves.iter()
    }

    /// The only leaf, when it is an operation
    pub fn single_node(&self) -> Option<NodeId> {
        if self.leaves.len() == 1 {
            self.leaves.iter().next().and_then(Leaf::as_node)
        } else {
            None
        }
    }
}

impl FromIterator<Leaf> for Fingerprint {
    fn from_iter<I: IntoIterator<Item = Leaf>>(iter: I) -> Self {
        Self {
            leaves: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Fingerprint {
    type Item = &'a Leaf;
    type IntoIter = btree_set::Iter<'a, Leaf>;

    fn into_iter(self) -> Self::IntoIter {
        self.leaves.iter()
    }
}

/// Which opcode classes stop the backward traversal
///
/// Memory reads, control merges and operations without operation operands
/// are always leaves. Merges being leaves is what keeps slicing out of
/// loop back-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeafPolicy {
    stop_at_address: bool,
}

impl LeafPolicy {
    /// Compare memory locations: address computations are leaves
    pub const ADDRESS: LeafPolicy = LeafPolicy {
        stop_at_address: true,
    };

    /// Compare value provenance: address computations are expanded
    pub const VALUE: LeafPolicy = LeafPolicy {
        stop_at_address: false,
    };

    pub fn for_kind(kind: GuardKind) -> Self {
        match kind {
            GuardKind::Address => Self::ADDRESS,
            GuardKind::Generic => Self::VALUE,
        }
    }

    pub fn stops_at_address(&self) -> bool {
        self.stop_at_address
    }

    pub fn is_leaf(&self, node: &OpNode) -> bool {
        match node.opcode {
            Opcode::MemoryRead | Opcode::ControlMerge => true,
            Opcode::AddressComputation if self.stop_at_address => true,
            _ => node.has_no_node_operands(),
        }
    }
}
