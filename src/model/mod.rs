//! Aggregation model: reduce per-subscriber measurements to average throughput.

use crate::error::TraceError;
use crate::trace::{RawMeasurement, SubscriberTraceGroup};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedThroughput {
    pub imsi: String,

    /// Bytes per second over the subscriber's summed interval durations.
    pub avg_rx_throughput: f64,
    pub avg_tx_throughput: f64,

    pub samples: usize,
    pub total_duration: f64,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Result of aggregating one direction's trace.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub throughput: Vec<AggregatedThroughput>,
    /// Subscribers that could not be aggregated, one error each.
    pub failures: Vec<TraceError>,
}

/// Reduce one subscriber's measurements.
///
/// Fails with `EmptyMeasurementWindow` when the summed interval duration is
/// not positive, instead of producing NaN or infinite rates, and with
/// `ByteCountOverflow` when a byte total does not fit in a u64.
pub fn aggregate_subscriber(
    imsi: &str,
    measurements: &[RawMeasurement],
) -> Result<AggregatedThroughput, TraceError> {
    let mut total_duration = 0.0f64;
    let mut rx_bytes = 0u64;
    let mut tx_bytes = 0u64;
    let overflow = || TraceError::ByteCountOverflow {
        imsi: imsi.to_string(),
    };
    for m in measurements {
        total_duration += m.duration();
        rx_bytes = rx_bytes.checked_add(m.rx_bytes).ok_or_else(overflow)?;
        tx_bytes = tx_bytes.checked_add(m.tx_bytes).ok_or_else(overflow)?;
    }

    if total_duration <= 0.0 {
        return Err(TraceError::EmptyMeasurementWindow {
            imsi: imsi.to_string(),
        });
    }

    Ok(AggregatedThroughput {
        imsi: imsi.to_string(),
        avg_rx_throughput: rx_bytes as f64 / total_duration,
        avg_tx_throughput: tx_bytes as f64 / total_duration,
        samples: measurements.len(),
        total_duration,
        rx_bytes,
        tx_bytes,
    })
}

/// Aggregate every subscriber of a group independently.
pub fn aggregate_group(group: &SubscriberTraceGroup) -> Aggregation {
    let mut out = Aggregation::default();
    for (imsi, measurements) in group {
        match aggregate_subscriber(imsi, measurements) {
            Ok(agg) => out.throughput.push(agg),
            Err(e) => out.failures.push(e),
        }
    }
    debug!(
        aggregated = out.throughput.len(),
        failed = out.failures.len(),
        "aggregated subscriber group"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn m(imsi: &str, start: f64, end: f64, tx: u64, rx: u64) -> RawMeasurement {
        RawMeasurement {
            start,
            end,
            imsi: imsi.to_string(),
            tx_bytes: tx,
            rx_bytes: rx,
        }
    }

    #[test]
    fn single_second_interval() {
        let agg = aggregate_subscriber("1", &[m("1", 0.0, 1.0, 1000, 2000)]).unwrap();
        assert_eq!(agg.avg_tx_throughput, 1000.0);
        assert_eq!(agg.avg_rx_throughput, 2000.0);
        assert_eq!(agg.samples, 1);
    }

    #[test]
    fn averages_over_summed_durations() {
        let rows = [
            m("1", 0.0, 0.25, 100, 50),
            m("1", 0.25, 0.5, 300, 150),
            m("1", 1.0, 1.5, 600, 0),
        ];
        let agg = aggregate_subscriber("1", &rows).unwrap();
        assert_eq!(agg.total_duration, 1.0);
        assert_eq!(agg.avg_tx_throughput, 1000.0);
        assert_eq!(agg.avg_rx_throughput, 200.0);
    }

    #[test]
    fn reconstructed_totals_match_raw_sums() {
        let rows = [
            m("3", 0.2, 0.45, 1289, 977),
            m("3", 0.45, 0.7, 3301, 2953),
            m("3", 0.7, 0.95, 17, 11),
        ];
        let agg = aggregate_subscriber("3", &rows).unwrap();
        let tx: u64 = rows.iter().map(|r| r.tx_bytes).sum();
        let rx: u64 = rows.iter().map(|r| r.rx_bytes).sum();
        assert!((agg.avg_tx_throughput * agg.total_duration - tx as f64).abs() < 1e-6);
        assert!((agg.avg_rx_throughput * agg.total_duration - rx as f64).abs() < 1e-6);
    }

    #[test]
    fn zero_length_window_fails_only_that_subscriber() {
        let mut group = SubscriberTraceGroup::new();
        group.insert("1".into(), vec![m("1", 0.0, 1.0, 10, 10)]);
        group.insert("2".into(), vec![m("2", 0.5, 0.5, 10, 10)]);
        group.insert("3".into(), vec![]);

        let agg = aggregate_group(&group);
        let ok: Vec<&str> = agg.throughput.iter().map(|a| a.imsi.as_str()).collect();
        assert_eq!(ok, vec!["1"]);
        let failed: Vec<&str> = agg
            .failures
            .iter()
            .filter_map(|e| match e {
                TraceError::EmptyMeasurementWindow { imsi } => Some(imsi.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec!["2", "3"]);
    }

    #[test]
    fn rates_are_always_finite() {
        let err = aggregate_subscriber("7", &[m("7", 2.0, 1.0, 10, 10)]).unwrap_err();
        assert!(matches!(err, TraceError::EmptyMeasurementWindow { imsi } if imsi == "7"));
    }

    #[test]
    fn byte_total_overflow_is_an_error() {
        let rows = [m("5", 0.0, 1.0, 1, u64::MAX), m("5", 1.0, 2.0, 1, 1)];
        let err = aggregate_subscriber("5", &rows).unwrap_err();
        assert!(matches!(err, TraceError::ByteCountOverflow { imsi } if imsi == "5"));
    }
}
