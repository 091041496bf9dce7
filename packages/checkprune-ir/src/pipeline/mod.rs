//! Pipeline orchestration

pub mod orchestrator;
pub mod report;
pub mod writer;

pub use orchestrator::{PrunePipeline, UnitOutcome};
pub use report::{Elimination, EvidenceMode, UnitReport, Warning};
pub use writer::ReportWriter;
