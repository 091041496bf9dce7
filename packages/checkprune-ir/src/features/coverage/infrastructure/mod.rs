//! Coverage infrastructure: trace sources and the record decoder

pub mod trace_reader;
pub mod trace_source;

pub use trace_reader::{encode_records, ingest_sanitizer, read_records, RECORD_BYTES};
pub use trace_source::{FileTrace, MemoryTrace, TraceSource};
