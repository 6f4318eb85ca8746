//! Report rendering: join both directions by IMSI, then format.

pub mod json;
pub mod table;

pub use json::render_json;
pub use table::write_table;

use crate::model::AggregatedThroughput;
use serde::Serialize;
use std::collections::BTreeMap;

/// Average (rx, tx) throughput of one subscriber in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Throughput {
    pub rx: f64,
    pub tx: f64,
}

impl From<&AggregatedThroughput> for Throughput {
    fn from(agg: &AggregatedThroughput) -> Self {
        Self {
            rx: agg.avg_rx_throughput,
            tx: agg.avg_tx_throughput,
        }
    }
}

/// One output row. `None` marks a direction with no data for the subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub imsi: String,
    pub downlink: Option<Throughput>,
    pub uplink: Option<Throughput>,
}

/// Join downlink and uplink results on IMSI.
///
/// Produces one row per IMSI present in either input, sorted ascending by the
/// IMSI string.
pub fn join_directions(
    downlink: &[AggregatedThroughput],
    uplink: &[AggregatedThroughput],
) -> Vec<ReportRow> {
    let mut dl: Vec<&AggregatedThroughput> = downlink.iter().collect();
    let mut ul: Vec<&AggregatedThroughput> = uplink.iter().collect();
    dl.sort_by(|a, b| a.imsi.cmp(&b.imsi));
    ul.sort_by(|a, b| a.imsi.cmp(&b.imsi));

    let mut rows: BTreeMap<&str, ReportRow> = BTreeMap::new();
    for agg in dl {
        rows.entry(agg.imsi.as_str())
            .or_insert_with(|| empty_row(&agg.imsi))
            .downlink = Some(agg.into());
    }
    for agg in ul {
        rows.entry(agg.imsi.as_str())
            .or_insert_with(|| empty_row(&agg.imsi))
            .uplink = Some(agg.into());
    }

    rows.into_values().collect()
}

fn empty_row(imsi: &str) -> ReportRow {
    ReportRow {
        imsi: imsi.to_string(),
        downlink: None,
        uplink: None,
    }
}
