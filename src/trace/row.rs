use std::collections::BTreeMap;

/// A single measurement row from an RLC statistics trace.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMeasurement {
    pub start: f64,
    pub end: f64,
    pub imsi: String,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

impl RawMeasurement {
    /// Length of the reporting interval in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Measurements grouped by IMSI, each list in file order.
pub type SubscriberTraceGroup = BTreeMap<String, Vec<RawMeasurement>>;
