//! Shared models: the dependency graph, control-flow graph and check types

pub mod check;
pub mod ids;
pub mod operation;
pub mod unit;

pub use check::{CheckOrigin, ConditionalCheck, GuardKind, RegularSuccessor};
pub use ids::{BlockId, CheckId, ExternalId, NodeId, ProcedureId};
pub use operation::{Constant, OpNode, Opcode, Operand};
pub use unit::{BasicBlock, Procedure, ProgramUnit, UnitBuilder};
