//! Error types for checkprune-ir
//!
//! Only integration contract violations and unrecoverable I/O surface as
//! errors. Missing coverage evidence is recovered inside the pipeline and
//! ambiguous check outcomes are reported as warnings.

use crate::config::ConfigError;
use crate::shared::models::{CheckId, NodeId};
use thiserror::Error;

/// Main error type for checkprune-ir operations
#[derive(Debug, Error)]
pub enum PruneError {
    /// The check classifier broke its own contract (fatal for the unit)
    #[error("Structural mismatch for check {check} at {node}: {reason}")]
    StructuralMismatch {
        check: CheckId,
        node: NodeId,
        reason: String,
    },

    /// IO error outside of trace ingestion
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error("Report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PruneError {
    pub fn structural(check: CheckId, node: NodeId, reason: impl Into<String>) -> Self {
        PruneError::StructuralMismatch {
            check,
            node,
            reason: reason.into(),
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, PruneError::StructuralMismatch { .. })
    }
}

/// Result type alias for checkprune operations
pub type Result<T> = std::result::Result<T, PruneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_message() {
        let err = PruneError::structural(CheckId(4), NodeId(12), "not a conditional branch");
        assert!(err.is_contract_violation());
        assert_eq!(
            err.to_string(),
            "Structural mismatch for check #4 at %12: not a conditional branch"
        );
    }

    #[test]
    fn test_io_is_not_contract_violation() {
        let err: PruneError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(!err.is_contract_violation());
    }
}
