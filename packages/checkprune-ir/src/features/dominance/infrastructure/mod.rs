pub mod oracle;

pub use oracle::DominanceOracle;
