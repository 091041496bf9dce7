//! Coverage trace decoding and ingestion
//!
//! Record layout (little-endian, 32 bytes):
//!
//! ```text
//! ┌──────────┬──────────────┬──────────┬──────────┐
//! │ id: u64  │ total: u64   │ left: u64│ right:u64│
//! └──────────┴──────────────┴──────────┴──────────┘
//! ```
//!
//! One record per check, in the classifier's enumeration order. The stored
//! total is ignored and recomputed from the two outcome counts.

use super::trace_source::TraceSource;
use crate::features::coverage::domain::{
    CoverageRecord, EvidenceError, PatternEntry, PatternTable, SanitizerEvidence,
};
use crate::shared::models::{CheckId, ConditionalCheck};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, ErrorKind, Read};
use tracing::debug;

/// Size of one encoded record
pub const RECORD_BYTES: usize = 32;

/// Read exactly one record per check, validating ids and length
pub fn read_records(
    source: &dyn TraceSource,
    checks: &[ConditionalCheck],
) -> Result<Vec<CoverageRecord>, EvidenceError> {
    let mut reader = source.open()?;
    let mut records = Vec::with_capacity(checks.len());

    for (position, check) in checks.iter().enumerate() {
        let record = match read_record(&mut reader) {
            Ok(record) => record,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(EvidenceError::Truncated {
                    expected: checks.len(),
                    read: position,
                })
            }
            Err(e) => return Err(EvidenceError::Io(e)),
        };

        if record.id != check.id {
            return Err(EvidenceError::IdMismatch {
                position,
                expected: check.id,
                found: record.id,
            });
        }
        records.push(record);
    }

    let mut probe = [0u8; 1];
    loop {
        match reader.read(&mut probe) {
            Ok(0) => break,
            Ok(_) => {
                return Err(EvidenceError::TrailingRecords {
                    expected: checks.len(),
                })
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(EvidenceError::Io(e)),
        }
    }

    debug!(
        source = %source.describe(),
        records = records.len(),
        "coverage trace decoded"
    );
    Ok(records)
}

fn read_record<R: Read + ?Sized>(reader: &mut R) -> std::io::Result<CoverageRecord> {
    let id = reader.read_u64::<LittleEndian>()?;
    let _total = reader.read_u64::<LittleEndian>()?;
    let left = reader.read_u64::<LittleEndian>()?;
    let right = reader.read_u64::<LittleEndian>()?;
    Ok(CoverageRecord {
        id: CheckId(id),
        left,
        right,
    })
}

/// Build the sanitizer pattern table and aggregates from a trace
pub fn ingest_sanitizer(
    source: &dyn TraceSource,
    checks: &[ConditionalCheck],
) -> Result<SanitizerEvidence, EvidenceError> {
    let records = read_records(source, checks)?;
    let mut table = PatternTable::new();
    let mut weight: u64 = 0;

    for (ordinal, (check, record)) in checks.iter().zip(&records).enumerate() {
        let total = record.total();
        weight = weight.saturating_add(total);
        table.insert(
            total,
            PatternEntry {
                id: record.id,
                left: record.left,
                right: record.right,
                branch: check.branch,
                ordinal,
            },
        );
    }

    Ok(SanitizerEvidence {
        records,
        table,
        num_checks: checks.len(),
        weight,
    })
}

/// Encode records in trace layout (the stored total is `left + right`)
pub fn encode_records(records: &[CoverageRecord]) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(records.len() * RECORD_BYTES);
    for record in records {
        buf.write_u64::<LittleEndian>(record.id.0)?;
        buf.write_u64::<LittleEndian>(record.total())?;
        buf.write_u64::<LittleEndian>(record.left)?;
        buf.write_u64::<LittleEndian>(record.right)?;
    }
    Ok(buf)
}
