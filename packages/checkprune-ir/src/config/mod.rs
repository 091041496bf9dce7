//! Configuration system for checkprune-ir
//!
//! ```yaml
//! version: 1
//! level: l2
//! phases:
//!   dominance_subsumption: true
//! traces:
//!   directory: /data/coverage
//! report:
//!   path: /data/prune.log
//!   format: text
//! limits:
//!   max_match_depth: 32
//! ```

pub mod error;
pub mod io;
pub mod level;
pub mod prune_config;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use level::PrecisionLevel;
pub use prune_config::{
    AnalysisLimits, InspectTarget, PhaseToggles, PruneConfig, ReportConfig, ReportFormat,
    TraceConfig,
};
pub use validation::Validatable;
