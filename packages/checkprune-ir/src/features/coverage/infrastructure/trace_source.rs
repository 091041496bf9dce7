//! Trace sources
//!
//! The sanitizer trace is read twice per unit (pattern table, then the
//! coverage phase), so a source hands out a fresh reader on every `open`.

use crate::features::coverage::domain::EvidenceError;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Re-openable byte stream of coverage records
pub trait TraceSource {
    /// Fresh reader positioned at the first record
    fn open(&self) -> Result<Box<dyn Read + '_>, EvidenceError>;

    /// Human-readable origin for log messages
    fn describe(&self) -> String;
}

/// Trace stored in a file
#[derive(Debug, Clone)]
pub struct FileTrace {
    path: PathBuf,
}

impl FileTrace {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceSource for FileTrace {
    fn open(&self) -> Result<Box<dyn Read + '_>, EvidenceError> {
        match File::open(&self.path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(EvidenceError::Absent {
                path: self.path.clone(),
            }),
            Err(e) => Err(EvidenceError::Io(e)),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Trace held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTrace {
    bytes: Vec<u8>,
}

impl MemoryTrace {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl TraceSource for MemoryTrace {
    fn open(&self) -> Result<Box<dyn Read + '_>, EvidenceError> {
        Ok(Box::new(Cursor::new(self.bytes.as_slice())))
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileTrace::new(dir.path().join("unit.scov"));
        match source.open() {
            Err(EvidenceError::Absent { path }) => assert!(path.ends_with("unit.scov")),
            other => panic!("expected Absent, got {:?}", other.map(|_| ())),
        };
    }

    #[test]
    fn test_memory_trace_reopens_from_start() {
        let source = MemoryTrace::new(vec![1, 2, 3]);
        for _ in 0..2 {
            let mut buf = Vec::new();
            source.open().unwrap().read_to_end(&mut buf).unwrap();
            assert_eq!(buf, vec![1, 2, 3]);
        }
        assert_eq!(source.describe(), "<memory: 3 bytes>");
    }
}
