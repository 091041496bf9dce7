//! Identifier newtypes
//!
//! All graph entities are arena-allocated inside a `ProgramUnit` and
//! addressed by index. Identity equality of operations is index equality.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

index_id!(
    /// Operation node in the unit's dependency graph
    NodeId,
    "%"
);
index_id!(
    /// Basic block in the unit's control-flow graph
    BlockId,
    "bb"
);
index_id!(
    /// Procedure (function) inside a unit
    ProcedureId,
    "fn"
);
index_id!(
    /// Opaque value defined outside the unit's operations (arguments, inputs)
    ExternalId,
    "$"
);

/// Persistent check id, shared by the coverage trace and static analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(pub u64);

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
