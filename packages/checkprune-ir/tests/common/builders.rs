//! Test data builders
//!
//! `ScenarioBuilder` lays out checks along a cursor block: every check
//! ends the current block, continues into a fresh block on its regular
//! (left) path and jumps to a shared failure block otherwise.

use checkprune_ir::adapters::TableClassifier;
use checkprune_ir::shared::models::{
    BlockId, CheckId, ConditionalCheck, Constant, ExternalId, GuardKind, NodeId, Opcode, Operand,
    ProcedureId, ProgramUnit, RegularSuccessor, UnitBuilder,
};

/// A built unit together with its classifier tables
#[derive(Debug, Clone)]
pub struct Scenario {
    pub unit: ProgramUnit,
    pub classifier: TableClassifier,
    pub sanitizer: Vec<ConditionalCheck>,
    pub user: Vec<ConditionalCheck>,
}

impl Scenario {
    pub fn sanitizer_check(&self, id: u64) -> ConditionalCheck {
        *self
            .sanitizer
            .iter()
            .find(|c| c.id == CheckId(id))
            .expect("unknown sanitizer check")
    }

    pub fn block_of(&self, check: &ConditionalCheck) -> BlockId {
        self.unit.node(check.branch).expect("branch node").block
    }
}

#[derive(Debug)]
pub struct ScenarioBuilder {
    b: UnitBuilder,
    procedure: ProcedureId,
    current: BlockId,
    fail: BlockId,
    classifier: TableClassifier,
    sanitizer: Vec<ConditionalCheck>,
    user: Vec<ConditionalCheck>,
}

impl ScenarioBuilder {
    pub fn new(name: &str) -> Self {
        let mut b = UnitBuilder::new(name);
        let procedure = b.procedure("main");
        let entry = b.block(procedure);
        let fail = b.block(procedure);
        Self {
            b,
            procedure,
            current: entry,
            fail,
            classifier: TableClassifier::new(),
            sanitizer: Vec::new(),
            user: Vec::new(),
        }
    }

    pub fn current(&self) -> BlockId {
        self.current
    }

    pub fn external(&mut self, name: &str) -> ExternalId {
        self.b.external(name)
    }

    /// Memory read in the cursor block
    pub fn read(&mut self, address: impl Into<Operand>) -> NodeId {
        self.b.op(self.current, Opcode::MemoryRead, vec![address.into()])
    }

    pub fn op(&mut self, opcode: Opcode, operands: Vec<Operand>) -> NodeId {
        self.b.op(self.current, opcode, operands)
    }

    pub fn named_op(&mut self, opcode: Opcode, operands: Vec<Operand>, name: &str) -> NodeId {
        self.b.named_op(self.current, opcode, operands, name)
    }

    /// `value < bound` as a user check
    pub fn user_check(&mut self, id: u64, value: impl Into<Operand>, bound: u64) -> ConditionalCheck {
        let branch = self.guard("icmp.slt", value.into(), bound);
        let check = ConditionalCheck::user(id, branch);
        self.classifier = std::mem::take(&mut self.classifier).with_user(check);
        self.user.push(check);
        check
    }

    /// `value < bound` as a sanitizer check with a known regular successor
    pub fn sanitizer_check(
        &mut self,
        id: u64,
        kind: GuardKind,
        value: impl Into<Operand>,
        bound: u64,
    ) -> ConditionalCheck {
        self.sanitizer_check_with(id, kind, value, bound, RegularSuccessor::Left)
    }

    pub fn sanitizer_check_with(
        &mut self,
        id: u64,
        kind: GuardKind,
        value: impl Into<Operand>,
        bound: u64,
        successor: RegularSuccessor,
    ) -> ConditionalCheck {
        let branch = self.guard("icmp.ult", value.into(), bound);
        let check = ConditionalCheck::sanitizer(id, branch, kind);
        self.classifier = std::mem::take(&mut self.classifier).with_sanitizer(check, successor);
        self.sanitizer.push(check);
        check
    }

    /// Fork the cursor on `condition`; returns `(then, else, join)`
    ///
    /// Both arms must end with `goto(join)`.
    pub fn fork(&mut self, condition: impl Into<Operand>) -> (BlockId, BlockId, BlockId) {
        let then_bb = self.b.block(self.procedure);
        let else_bb = self.b.block(self.procedure);
        let join = self.b.block(self.procedure);
        self.b.branch(self.current, condition, then_bb, else_bb);
        (then_bb, else_bb, join)
    }

    /// Move the cursor without adding an edge
    pub fn at(&mut self, block: BlockId) {
        self.current = block;
    }

    /// Jump from the cursor to `block` and move there
    pub fn goto(&mut self, block: BlockId) {
        self.b.jump(self.current, block);
        self.current = block;
    }

    pub fn build(self) -> Scenario {
        Scenario {
            unit: self.b.build(),
            classifier: self.classifier,
            sanitizer: self.sanitizer,
            user: self.user,
        }
    }

    fn guard(&mut self, predicate: &str, value: Operand, bound: u64) -> NodeId {
        let cmp = self.b.op(
            self.current,
            Opcode::generic(predicate),
            vec![value, Operand::Constant(Constant::Int(bound))],
        );
        let next = self.b.block(self.procedure);
        let branch = self.b.branch(self.current, cmp, next, self.fail);
        self.current = next;
        branch
    }
}
