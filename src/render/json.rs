use crate::model::AggregatedThroughput;
use crate::render::ReportRow;
use serde::Serialize;

/// Sums over every aggregated subscriber of one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionTotals {
    pub subscribers: usize,
    pub samples: usize,
    /// Summed interval durations, seconds.
    pub duration: f64,
    pub rx_bytes: u128,
    pub tx_bytes: u128,
}

impl DirectionTotals {
    pub fn from_aggregates(aggs: &[AggregatedThroughput]) -> Self {
        Self {
            subscribers: aggs.len(),
            samples: aggs.iter().map(|a| a.samples).sum(),
            duration: aggs.iter().map(|a| a.total_duration).sum(),
            rx_bytes: aggs.iter().map(|a| u128::from(a.rx_bytes)).sum(),
            tx_bytes: aggs.iter().map(|a| u128::from(a.tx_bytes)).sum(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub downlink: DirectionTotals,
    pub uplink: DirectionTotals,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    rows: &'a [ReportRow],
    totals: &'a TotalsView,
}

/// Render the joined rows as pretty JSON; missing directions become `null`.
pub fn render_json(rows: &[ReportRow], totals: &TotalsView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { rows, totals })
}
