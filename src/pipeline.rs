//! Orchestration: read + aggregate both traces, then render into a sink.

use crate::error::TraceError;
use crate::model::{self, AggregatedThroughput, Aggregation};
use crate::render::json::{DirectionTotals, TotalsView};
use crate::render::{self, join_directions};
use crate::trace::{self, Direction};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_DL_TRACE: &str = "DlRlcStats.txt";
pub const DEFAULT_UL_TRACE: &str = "UlRlcStats.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// What to do with subscribers whose measurement window sums to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyWindowPolicy {
    /// Stop before rendering and name every offending subscriber.
    #[default]
    Strict,
    /// Warn and leave the subscriber out of that direction.
    Skip,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub downlink: PathBuf,
    pub uplink: PathBuf,
    pub format: OutputFormat,
    pub empty_window: EmptyWindowPolicy,
}

impl PipelineConfig {
    pub fn new(downlink: impl Into<PathBuf>, uplink: impl Into<PathBuf>) -> Self {
        Self {
            downlink: downlink.into(),
            uplink: uplink.into(),
            format: OutputFormat::default(),
            empty_window: EmptyWindowPolicy::default(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DL_TRACE, DEFAULT_UL_TRACE)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{direction} trace: {source}")]
    Trace {
        direction: Direction,
        #[source]
        source: TraceError,
    },

    #[error(
        "{direction} trace: empty measurement window for subscriber(s) {}",
        subscribers.join(", ")
    )]
    EmptyWindows {
        direction: Direction,
        subscribers: Vec<String>,
    },

    #[error("write report: {0}")]
    Write(#[from] io::Error),

    #[error("serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the whole report: downlink first, then uplink, then render to `out`.
///
/// Nothing is written to `out` unless both directions were read and
/// aggregated successfully.
pub fn run<W: Write>(config: &PipelineConfig, out: &mut W) -> Result<(), PipelineError> {
    let downlink = process_direction(Direction::Downlink, &config.downlink, config.empty_window)?;
    let uplink = process_direction(Direction::Uplink, &config.uplink, config.empty_window)?;

    let rows = join_directions(&downlink, &uplink);
    info!(rows = rows.len(), "rendering report");

    match config.format {
        OutputFormat::Text => render::write_table(&rows, out)?,
        OutputFormat::Json => {
            let totals = TotalsView {
                downlink: DirectionTotals::from_aggregates(&downlink),
                uplink: DirectionTotals::from_aggregates(&uplink),
            };
            let json = render::render_json(&rows, &totals)?;
            writeln!(out, "{}", json)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn process_direction(
    direction: Direction,
    path: &Path,
    policy: EmptyWindowPolicy,
) -> Result<Vec<AggregatedThroughput>, PipelineError> {
    info!(%direction, path = %path.display(), "reading trace");
    let group = trace::read_trace_file(path)
        .map_err(|source| PipelineError::Trace { direction, source })?;

    let Aggregation {
        throughput,
        failures,
    } = model::aggregate_group(&group);

    let mut empty = Vec::new();
    for failure in failures {
        match failure {
            TraceError::EmptyMeasurementWindow { imsi } => empty.push(imsi),
            source => return Err(PipelineError::Trace { direction, source }),
        }
    }

    if !empty.is_empty() {
        match policy {
            EmptyWindowPolicy::Strict => {
                return Err(PipelineError::EmptyWindows {
                    direction,
                    subscribers: empty,
                });
            }
            EmptyWindowPolicy::Skip => {
                for imsi in &empty {
                    warn!(%direction, %imsi, "dropping subscriber with empty measurement window");
                }
            }
        }
    }

    Ok(throughput)
}
