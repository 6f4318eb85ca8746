//! Parsing for the RLC statistics traces (DlRlcStats.txt / UlRlcStats.txt).

pub mod parse;
pub mod row;

pub use parse::read_trace_file;
pub use row::{RawMeasurement, SubscriberTraceGroup};

use std::fmt;

/// Link direction a trace file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Downlink,
    Uplink,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Downlink => f.write_str("downlink"),
            Direction::Uplink => f.write_str("uplink"),
        }
    }
}
