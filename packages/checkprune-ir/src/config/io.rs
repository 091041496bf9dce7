//! Configuration I/O (YAML loading)
//!
//! Defines the YAML schema. Loading and export live in prune_config.rs.

use super::prune_config::{AnalysisLimits, PhaseToggles, ReportConfig, TraceConfig};
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Precision level name (`l0`..`l3`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<PhaseToggles>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub traces: Option<TraceConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<AnalysisLimits>,
}

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];
