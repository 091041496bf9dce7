//! Append-only report stream

use super::report::UnitReport;
use crate::config::ReportFormat;
use crate::errors::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one record per unit; every record is flushed before returning
pub struct ReportWriter<W: Write> {
    out: W,
    format: ReportFormat,
}

impl ReportWriter<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed
    pub fn append_to(path: impl AsRef<Path>, format: ReportFormat) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file), format))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self { out, format }
    }

    pub fn write(&mut self, report: &UnitReport) -> Result<()> {
        match self.format {
            ReportFormat::Text => {
                writeln!(self.out, "{}", report.summary_line())?;
                if let Some(detail) = &report.detail {
                    writeln!(
                        self.out,
                        "{} inspect {} cost {}/{} checks {} group {}/{} cost_range [{:.4}, {:.4}] rank_range [{:.4}, {:.4}] {}",
                        report.unit,
                        detail.id,
                        detail.cost,
                        detail.total_cost,
                        detail.total_checks,
                        detail.index_in_group,
                        detail.group_size,
                        detail.cost_range[0],
                        detail.cost_range[1],
                        detail.rank_range[0],
                        detail.rank_range[1],
                        detail.verdict.as_str()
                    )?;
                }
                for warning in &report.warnings {
                    writeln!(self.out, "{} warning {}", report.unit, warning)?;
                }
            }
            ReportFormat::JsonLines => {
                let line = serde_json::to_string(report)?;
                writeln!(self.out, "{}", line)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
