//! Slicing infrastructure

pub mod slicer;

pub use slicer::{merge_frontier, Slicer, SlicerCacheStats};
