//! Program unit (module) model
//!
//! A unit owns every operation, block and procedure it contains. Analyses
//! borrow the unit immutably; only the rewrite applier takes `&mut`.

use super::ids::{BlockId, ExternalId, NodeId, ProcedureId};
use super::operation::{OpNode, Opcode, Operand};
use serde::{Deserialize, Serialize};

/// Basic block of a procedure's control-flow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: BlockId,
    pub procedure: ProcedureId,
    pub successors: Vec<BlockId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Procedure: an entry block plus the blocks it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: ProcedureId,
    pub name: String,
    pub entry: BlockId,
    pub blocks: Vec<BlockId>,
}

/// Program unit (the granularity of one analysis run)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramUnit {
    pub name: String,
    nodes: Vec<OpNode>,
    blocks: Vec<BasicBlock>,
    procedures: Vec<Procedure>,
    externals: Vec<String>,
}

impl ProgramUnit {
    pub fn node(&self, id: NodeId) -> Option<&OpNode> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut OpNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn nodes(&self) -> &[OpNode] {
        &self.nodes
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.index())
    }

    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    pub fn procedure(&self, id: ProcedureId) -> Option<&Procedure> {
        self.procedures.get(id.index())
    }

    pub fn procedures(&self) -> &[Procedure] {
        &self.procedures
    }

    /// Procedure owning the block of `node`
    pub fn procedure_of(&self, node: NodeId) -> Option<ProcedureId> {
        let block = self.node(node)?.block;
        self.block(block).map(|b| b.procedure)
    }

    pub fn external_name(&self, id: ExternalId) -> Option<&str> {
        self.externals.get(id.index()).map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Incremental builder for `ProgramUnit`
///
/// Ids are handed out densely in creation order, so a node id always
/// indexes the arena it was created in.
#[derive(Debug)]
pub struct UnitBuilder {
    name: String,
    nodes: Vec<OpNode>,
    blocks: Vec<BasicBlock>,
    procedures: Vec<Procedure>,
    externals: Vec<String>,
}

impl UnitBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            blocks: Vec::new(),
            procedures: Vec::new(),
            externals: Vec::new(),
        }
    }

    /// Start a new procedure; its first block becomes the entry
    pub fn procedure(&mut self, name: impl Into<String>) -> ProcedureId {
        let id = ProcedureId(self.procedures.len() as u32);
        self.procedures.push(Procedure {
            id,
            name: name.into(),
            entry: BlockId(u32::MAX),
            blocks: Vec::new(),
        });
        id
    }

    pub fn block(&mut self, procedure: ProcedureId) -> BlockId {
        self.labeled_block(procedure, None::<String>)
    }

    pub fn labeled_block(
        &mut self,
        procedure: ProcedureId,
        label: Option<impl Into<String>>,
    ) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock {
            id,
            procedure,
            successors: Vec::new(),
            label: label.map(Into::into),
        });
        let proc = &mut self.procedures[procedure.index()];
        if proc.blocks.is_empty() {
            proc.entry = id;
        }
        proc.blocks.push(id);
        id
    }

    /// Unconditional control-flow edge
    pub fn jump(&mut self, from: BlockId, to: BlockId) {
        let succs = &mut self.blocks[from.index()].successors;
        if !succs.contains(&to) {
            succs.push(to);
        }
    }

    pub fn external(&mut self, name: impl Into<String>) -> ExternalId {
        let id = ExternalId(self.externals.len() as u32);
        self.externals.push(name.into());
        id
    }

    pub fn op(
        &mut self,
        block: BlockId,
        opcode: Opcode,
        operands: impl IntoIterator<Item = Operand>,
    ) -> NodeId {
        self.push_node(block, opcode, operands.into_iter().collect(), None, Vec::new())
    }

    pub fn named_op(
        &mut self,
        block: BlockId,
        opcode: Opcode,
        operands: impl IntoIterator<Item = Operand>,
        name: impl Into<String>,
    ) -> NodeId {
        self.push_node(
            block,
            opcode,
            operands.into_iter().collect(),
            Some(name.into()),
            Vec::new(),
        )
    }

    /// Conditional branch terminating `block`; also records both CFG edges
    pub fn branch(
        &mut self,
        block: BlockId,
        condition: impl Into<Operand>,
        left: BlockId,
        right: BlockId,
    ) -> NodeId {
        self.jump(block, left);
        self.jump(block, right);
        self.push_node(
            block,
            Opcode::CondBranch,
            vec![condition.into()],
            None,
            vec![left, right],
        )
    }

    fn push_node(
        &mut self,
        block: BlockId,
        opcode: Opcode,
        operands: Vec<Operand>,
        name: Option<String>,
        successors: Vec<BlockId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(OpNode {
            id,
            opcode,
            operands,
            block,
            name,
            successors,
        });
        id
    }

    pub fn build(self) -> ProgramUnit {
        ProgramUnit {
            name: self.name,
            nodes: self.nodes,
            blocks: self.blocks,
            procedures: self.procedures,
            externals: self.externals,
        }
    }
}
