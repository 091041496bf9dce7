//! Coverage ingestion
//!
//! Reads the per-unit sanitizer and user check traces and indexes
//! sanitizer checks by total count.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - CoverageRecord, PatternTable         │
//! │  - Evidence, EvidenceError              │
//! └─────────────────────────────────────────┘
//!                   ▲
//!                   │
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - TraceSource (file / memory)          │
//! │  - read_records, ingest_sanitizer       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! A trace that is missing or does not line up with the classifier's
//! enumeration is never fatal: callers downgrade to static-only analysis.

pub mod domain;
pub mod infrastructure;

pub use domain::{
    CoverageRecord, Evidence, EvidenceError, PatternEntry, PatternTable, SanitizerEvidence,
};
pub use infrastructure::{
    encode_records, ingest_sanitizer, read_records, FileTrace, MemoryTrace, TraceSource,
    RECORD_BYTES,
};
