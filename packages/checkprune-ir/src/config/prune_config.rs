//! Pruning configuration
//!
//! One `PruneConfig` drives a whole batch of units. Every section has a
//! default so a YAML file only needs to name what it changes.

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, SUPPORTED_VERSIONS};
use super::level::PrecisionLevel;
use super::validation::Validatable;
use crate::shared::models::CheckId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Phase on/off switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhaseToggles {
    /// Phase 1: user checks subsume sanitizer checks (needs traces)
    pub user_subsumption: bool,
    /// Phase 2: earlier sanitizer checks subsume later ones (needs traces)
    pub coverage_subsumption: bool,
    /// Phase 3: dominance-based subsumption (no traces)
    pub dominance_subsumption: bool,
}

impl Default for PhaseToggles {
    fn default() -> Self {
        Self {
            user_subsumption: true,
            coverage_subsumption: true,
            dominance_subsumption: true,
        }
    }
}

/// Where per-unit coverage traces live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    pub sanitizer_extension: String,
    pub user_extension: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            directory: None,
            sanitizer_extension: "scov".to_string(),
            user_extension: "ucov".to_string(),
        }
    }
}

impl TraceConfig {
    /// `<directory>/<unit>.<sanitizer_extension>`
    pub fn sanitizer_trace(&self, unit: &str) -> Option<PathBuf> {
        self.trace_path(unit, &self.sanitizer_extension)
    }

    /// `<directory>/<unit>.<user_extension>`
    pub fn user_trace(&self, unit: &str) -> Option<PathBuf> {
        self.trace_path(unit, &self.user_extension)
    }

    fn trace_path(&self, unit: &str, extension: &str) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|dir| dir.join(format!("{}.{}", unit, extension)))
    }
}

/// Report record encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Whitespace-separated summary line per unit
    #[default]
    Text,
    /// One JSON object per unit
    JsonLines,
}

/// Check selected for detailed cost inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectTarget {
    pub check_id: CheckId,
    /// Restrict to one unit (all units when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl InspectTarget {
    pub fn applies_to(&self, unit: &str) -> bool {
        self.unit.as_deref().map_or(true, |u| u == unit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Append-only report file (no report written when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub format: ReportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect: Option<InspectTarget>,
}

/// Bounds on the equivalence tester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisLimits {
    /// Maximum recursion depth of the structural comparison
    pub max_match_depth: usize,
    /// Name prefix of loop induction merges
    pub induction_prefix: String,
}

impl AnalysisLimits {
    pub const MIN_MATCH_DEPTH: usize = 1;
    pub const MAX_MATCH_DEPTH: usize = 256;
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_match_depth: 32,
            induction_prefix: "indvars".to_string(),
        }
    }
}

impl Validatable for AnalysisLimits {
    fn validate(&self) -> ConfigResult<()> {
        if !(Self::MIN_MATCH_DEPTH..=Self::MAX_MATCH_DEPTH).contains(&self.max_match_depth) {
            return Err(ConfigError::range_with_hint(
                "limits.max_match_depth",
                self.max_match_depth,
                Self::MIN_MATCH_DEPTH,
                Self::MAX_MATCH_DEPTH,
                "Structural matching needs at least one level; deep values only cost time",
            ));
        }
        if self.induction_prefix.is_empty() {
            return Err(ConfigError::Conflict {
                issue: "limits.induction_prefix is empty and would match every merge".to_string(),
                fix: "Use the loop pass's induction name prefix, e.g. 'indvars'".to_string(),
            });
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "AnalysisLimits"
    }
}

impl Validatable for TraceConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.sanitizer_extension.is_empty() || self.user_extension.is_empty() {
            return Err(ConfigError::Conflict {
                issue: "trace extensions must not be empty".to_string(),
                fix: "Set traces.sanitizer_extension and traces.user_extension".to_string(),
            });
        }
        if self.sanitizer_extension == self.user_extension {
            return Err(ConfigError::Conflict {
                issue: format!(
                    "sanitizer and user traces share the extension '{}'",
                    self.sanitizer_extension
                ),
                fix: "Use distinct extensions (defaults: 'scov' and 'ucov')".to_string(),
            });
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "TraceConfig"
    }
}

/// Top-level configuration of the pruning pipeline
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    pub level: PrecisionLevel,
    pub phases: PhaseToggles,
    pub traces: TraceConfig,
    pub report: ReportConfig,
    pub limits: AnalysisLimits,
}

impl PruneConfig {
    pub fn with_level(level: PrecisionLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Load a versioned YAML configuration and validate it
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let level = match export.level {
            Some(name) => PrecisionLevel::from_str(&name)?,
            None => PrecisionLevel::default(),
        };

        let config = Self {
            level,
            phases: export.phases.unwrap_or_default(),
            traces: export.traces.unwrap_or_default(),
            report: export.report.unwrap_or_default(),
            limits: export.limits.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Export as a version 1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            level: Some(self.level.to_string()),
            phases: Some(self.phases),
            traces: Some(self.traces.clone()),
            report: Some(self.report.clone()),
            limits: Some(self.limits.clone()),
        };
        Ok(serde_yaml::to_string(&export)?)
    }

    /// Both phases that read traces are off
    pub fn is_static_only(&self) -> bool {
        !self.phases.user_subsumption && !self.phases.coverage_subsumption
    }
}

impl Validatable for PruneConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.limits.validate()?;
        self.traces.validate()?;
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "PruneConfig"
    }
}
