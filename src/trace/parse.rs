use crate::error::{RecordError, TraceError};
use crate::trace::row::{RawMeasurement, SubscriberTraceGroup};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const FIELD_COUNT: usize = 10;

/// Parse one data line of an RLC statistics trace.
///
/// Expected columns (whitespace-separated):
/// start  end  cellId  IMSI  RNTI  LCID  nTxPDUs  TxBytes  nRxPDUs  RxBytes  [stats...]
///
/// Example:
/// 0.25   0.5   1   2   1   3   10   1280   10   1280   0.001 ...
///
/// Only start, end, IMSI, TxBytes and RxBytes are kept.
pub fn parse_record(line: &str) -> Result<RawMeasurement, RecordError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < FIELD_COUNT {
        return Err(RecordError::TooFewFields {
            found: fields.len(),
        });
    }

    Ok(RawMeasurement {
        start: parse_timestamp(fields[0], "start")?,
        end: parse_timestamp(fields[1], "end")?,
        imsi: fields[3].to_string(),
        tx_bytes: parse_bytes(fields[7], "tx_bytes")?,
        rx_bytes: parse_bytes(fields[9], "rx_bytes")?,
    })
}

/// Timestamps are plain non-negative seconds; NaN, infinities and signs are rejected.
fn parse_timestamp(s: &str, field: &'static str) -> Result<f64, RecordError> {
    let invalid = || RecordError::InvalidNumber {
        field,
        value: s.to_string(),
    };
    if s.starts_with(['+', '-']) {
        return Err(invalid());
    }
    let v: f64 = s.parse().map_err(|_| invalid())?;
    if !v.is_finite() {
        return Err(invalid());
    }
    Ok(v)
}

fn parse_bytes(s: &str, field: &'static str) -> Result<u64, RecordError> {
    // u64::from_str accepts a leading '+', the trace never writes one.
    if s.starts_with('+') {
        return Err(RecordError::InvalidNumber {
            field,
            value: s.to_string(),
        });
    }
    s.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: s.to_string(),
    })
}

/// Read a trace file into measurements grouped by IMSI.
///
/// The first line is a header and is discarded without being decoded. Empty
/// lines are skipped; any other line that fails to decode or parse aborts the
/// whole read.
pub fn read_trace_file(path: &Path) -> Result<SubscriberTraceGroup, TraceError> {
    let file = File::open(path).map_err(|source| TraceError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut out = SubscriberTraceGroup::new();
    let mut records = 0usize;
    for (lineno, bytes) in reader.split(b'\n').enumerate() {
        let lno = lineno + 1;
        let bytes = bytes.map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // Header.
        if lno == 1 {
            continue;
        }
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(&bytes);
        if bytes.is_empty() {
            continue;
        }

        let malformed = |source: RecordError| TraceError::MalformedRecord {
            path: path.to_path_buf(),
            line: lno,
            source,
        };
        let line = std::str::from_utf8(bytes)
            .map_err(|e| malformed(RecordError::InvalidEncoding { offset: e.valid_up_to() }))?;
        let row = parse_record(line).map_err(malformed)?;
        out.entry(row.imsi.clone()).or_default().push(row);
        records += 1;
    }

    debug!(
        path = %path.display(),
        records,
        subscribers = out.len(),
        "read trace file"
    );
    Ok(out)
}
