use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod error;
mod model;
mod pipeline;
mod render;
mod trace;

use pipeline::{EmptyWindowPolicy, OutputFormat, PipelineConfig};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "rlc-throughput")]
#[command(about = "Per-subscriber throughput report from LTE RLC traces", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the downlink and uplink traces and print the throughput table.
    Report {
        #[arg(long, default_value = pipeline::DEFAULT_DL_TRACE)]
        dl: PathBuf,

        #[arg(long, default_value = pipeline::DEFAULT_UL_TRACE)]
        ul: PathBuf,

        /// Write the report here instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Drop subscribers with an empty measurement window instead of failing.
        #[arg(long)]
        skip_empty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Report {
            dl,
            ul,
            out,
            format,
            skip_empty,
        } => {
            let config = PipelineConfig {
                downlink: dl,
                uplink: ul,
                format,
                empty_window: if skip_empty {
                    EmptyWindowPolicy::Skip
                } else {
                    EmptyWindowPolicy::Strict
                },
            };

            write_report(&config, out.as_deref())?;
        }
    }

    Ok(())
}

/// Render to `out`, or to stdout when no path is given.
///
/// A file is only created once the report has rendered, so a failed run leaves
/// nothing behind.
fn write_report(config: &PipelineConfig, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let mut buf = Vec::new();
            pipeline::run(config, &mut buf)?;
            let file = File::create(path)
                .with_context(|| format!("create report file {}", path.display()))?;
            let mut w = BufWriter::new(file);
            w.write_all(&buf)?;
            w.flush()?;
            println!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            pipeline::run(config, &mut stdout.lock())?;
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
