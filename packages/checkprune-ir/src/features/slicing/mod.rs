//! Dependency slicing
//!
//! Backward traversal from a check's condition to its leaves.
//!
//! # Leaf classes
//!
//! | Opcode class          | `ADDRESS` policy | `VALUE` policy |
//! |-----------------------|------------------|----------------|
//! | memory read           | leaf             | leaf           |
//! | control merge         | leaf             | leaf           |
//! | address computation   | leaf             | expanded       |
//! | no operation operands | leaf             | leaf           |
//! | constant              | dropped          | dropped        |

pub mod domain;
pub mod infrastructure;

pub use domain::{Fingerprint, Leaf, LeafPolicy};
pub use infrastructure::{merge_frontier, Slicer, SlicerCacheStats};
