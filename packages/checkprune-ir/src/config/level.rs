//! Precision levels
//!
//! Levels trade soundness for aggressiveness. They are knobs on the
//! equivalence tester, not separate passes.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Precision level of the redundancy proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrecisionLevel {
    /// Immediate condition operands compared structurally
    ///
    /// - Cheapest, most conservative
    L0,

    /// L0 plus the loop induction-variable heuristic
    L1,

    /// Full recursive fingerprint comparison
    L2,

    /// A matching dynamic count pattern alone is proof
    ///
    /// Advisory use only: not sound.
    L3,
}

impl PrecisionLevel {
    /// Parse level from string (`l2`, `L2`)
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "l0" => Ok(Self::L0),
            "l1" => Ok(Self::L1),
            "l2" => Ok(Self::L2),
            "l3" => Ok(Self::L3),
            _ => Err(ConfigError::UnknownLevel(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L0 => "L0",
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
        }
    }

    /// Only the condition operand is compared
    pub fn is_shallow(&self) -> bool {
        matches!(self, Self::L0 | Self::L1)
    }

    /// Induction-variable heuristic enabled
    pub fn uses_induction_heuristic(&self) -> bool {
        *self != Self::L0
    }

    /// Count match alone proves subsumption
    pub fn trusts_counts(&self) -> bool {
        *self == Self::L3
    }
}

impl Default for PrecisionLevel {
    fn default() -> Self {
        Self::L2
    }
}

impl std::fmt::Display for PrecisionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!(PrecisionLevel::from_str("l0").unwrap(), PrecisionLevel::L0);
        assert_eq!(PrecisionLevel::from_str("L3").unwrap(), PrecisionLevel::L3);
        assert!(matches!(
            PrecisionLevel::from_str("l4"),
            Err(ConfigError::UnknownLevel(_))
        ));
    }

    #[test]
    fn test_level_knobs() {
        assert!(PrecisionLevel::L0.is_shallow());
        assert!(PrecisionLevel::L1.is_shallow());
        assert!(!PrecisionLevel::L2.is_shallow());

        assert!(!PrecisionLevel::L0.uses_induction_heuristic());
        assert!(PrecisionLevel::L1.uses_induction_heuristic());

        assert!(PrecisionLevel::L3.trusts_counts());
        assert!(!PrecisionLevel::L2.trusts_counts());
    }

    #[test]
    fn test_default_is_l2() {
        assert_eq!(PrecisionLevel::default(), PrecisionLevel::L2);
        assert_eq!(PrecisionLevel::default().to_string(), "L2");
    }
}
