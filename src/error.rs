//! Typed failures of the trace pipeline.

use std::io;
use std::path::PathBuf;

/// Why a single trace line could not be decoded.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected at least 10 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("field {field} has invalid value {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("line is not valid UTF-8 after byte {offset}")]
    InvalidEncoding { offset: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("cannot open trace file {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed record at {}:{line}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("subscriber {imsi} has an empty measurement window")]
    EmptyMeasurementWindow { imsi: String },

    #[error("byte count total of subscriber {imsi} overflows u64")]
    ByteCountOverflow { imsi: String },

    #[error("read error in {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
