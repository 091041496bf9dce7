//! Infrastructure layer for cost analysis

pub mod analyzer;

pub use analyzer::CostAnalyzer;
