//! Dominator and post-dominator trees over basic blocks
//!
//! One CFG per procedure. Post-dominators are computed on the reversed
//! CFG rooted at a synthetic exit that every returning block flows into.
//! Blocks that cannot reach an exit are post-dominated by nothing.

use crate::shared::models::{BlockId, ProcedureId, ProgramUnit};
use petgraph::algo::dominators::{simple_fast, Dominators};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Reversed;
use rustc_hash::FxHashMap;

/// Dominance relations of one procedure
#[derive(Debug)]
struct ProcedureDominance {
    /// Block → node index mapping for O(1) lookups
    block_to_node: FxHashMap<BlockId, NodeIndex>,
    /// Node weights; `None` is the synthetic exit
    graph: DiGraph<Option<BlockId>, ()>,
    dom: Dominators<NodeIndex>,
    postdom: Dominators<NodeIndex>,
}

impl ProcedureDominance {
    fn build(unit: &ProgramUnit, procedure: ProcedureId) -> Option<Self> {
        let proc = unit.procedure(procedure)?;
        let mut graph: DiGraph<Option<BlockId>, ()> = DiGraph::new();
        let mut block_to_node = FxHashMap::default();

        for &block in &proc.blocks {
            let idx = graph.add_node(Some(block));
            block_to_node.insert(block, idx);
        }
        let exit = graph.add_node(None);

        for &block in &proc.blocks {
            let (Some(bb), Some(&from)) = (unit.block(block), block_to_node.get(&block)) else {
                continue;
            };
            let mut has_local_successor = false;
            for succ in &bb.successors {
                // edges leaving the procedure are ignored
                if let Some(&to) = block_to_node.get(succ) {
                    graph.add_edge(from, to, ());
                    has_local_successor = true;
                }
            }
            if !has_local_successor {
                graph.add_edge(from, exit, ());
            }
        }

        let entry = *block_to_node.get(&proc.entry)?;
        let dom = simple_fast(&graph, entry);
        let postdom = simple_fast(Reversed(&graph), exit);

        Some(Self {
            block_to_node,
            graph,
            dom,
            postdom,
        })
    }

    fn relation(&self, tree: &Dominators<NodeIndex>, a: BlockId, b: BlockId) -> bool {
        let (Some(&a), Some(&b)) = (self.block_to_node.get(&a), self.block_to_node.get(&b)) else {
            return false;
        };
        match tree.dominators(b) {
            Some(mut chain) => chain.any(|d| d == a),
            None => false,
        }
    }

    fn block(&self, idx: NodeIndex) -> Option<BlockId> {
        self.graph.node_weight(idx).copied().flatten()
    }
}

/// Dominance oracle for a whole unit
#[derive(Debug, Default)]
pub struct DominanceOracle {
    procedures: FxHashMap<ProcedureId, ProcedureDominance>,
    block_owner: FxHashMap<BlockId, ProcedureId>,
}

impl DominanceOracle {
    /// Build dominator and post-dominator trees for every procedure
    pub fn build(unit: &ProgramUnit) -> Self {
        let mut oracle = Self::default();
        for proc in unit.procedures() {
            if let Some(tree) = ProcedureDominance::build(unit, proc.id) {
                for &block in &proc.blocks {
                    oracle.block_owner.insert(block, proc.id);
                }
                oracle.procedures.insert(proc.id, tree);
            }
        }
        oracle
    }

    fn same_procedure(&self, a: BlockId, b: BlockId) -> Option<&ProcedureDominance> {
        let pa = self.block_owner.get(&a)?;
        let pb = self.block_owner.get(&b)?;
        if pa != pb {
            return None;
        }
        self.procedures.get(pa)
    }

    /// Every path from the entry to `b` passes through `a` (reflexive)
    pub fn dominates(&self, a: BlockId, b: BlockId) -> bool {
        self.same_procedure(a, b)
            .map_or(false, |p| p.relation(&p.dom, a, b))
    }

    /// Every path from `b` to an exit passes through `a` (reflexive)
    pub fn post_dominates(&self, a: BlockId, b: BlockId) -> bool {
        self.same_procedure(a, b)
            .map_or(false, |p| p.relation(&p.postdom, a, b))
    }

    pub fn immediate_dominator(&self, block: BlockId) -> Option<BlockId> {
        let proc = self.procedures.get(self.block_owner.get(&block)?)?;
        let idx = *proc.block_to_node.get(&block)?;
        proc.dom
            .immediate_dominator(idx)
            .and_then(|idom| proc.block(idom))
    }

    /// Immediate post-dominator; `None` when only the exit post-dominates
    pub fn immediate_post_dominator(&self, block: BlockId) -> Option<BlockId> {
        let proc = self.procedures.get(self.block_owner.get(&block)?)?;
        let idx = *proc.block_to_node.get(&block)?;
        proc.postdom
            .immediate_dominator(idx)
            .and_then(|ipdom| proc.block(ipdom))
    }

    pub fn procedure_count(&self) -> usize {
        self.procedures.len()
    }
}
