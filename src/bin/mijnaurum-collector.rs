// ABOUTME: Host binary running MijnAurum gather cycles on an interval
// ABOUTME: Writes metrics to stdout as line protocol or JSON lines, logs to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

//! # MijnAurum Collector Binary
//!
//! Loads configuration from the environment, then either runs a single gather
//! cycle (`--once`) or keeps collecting on a fixed interval until Ctrl-C.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mijnaurum_collector::config::CollectorConfig;
use mijnaurum_collector::gather::HeatCollector;
use mijnaurum_collector::logging;
use mijnaurum_collector::sink::{OutputFormat, WriterSink};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// `InfluxDB` line protocol
    Line,
    /// One JSON object per metric
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Line => Self::Line,
            Format::Json => Self::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "mijnaurum-collector")]
#[command(about = "Collect MijnAurum heat usage and print it as metrics")]
struct Args {
    /// Run a single gather cycle and exit
    #[arg(long)]
    once: bool,

    /// Override the interval between cycles
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Metric output format
    #[arg(long, value_enum, default_value = "line")]
    format: Format,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = CollectorConfig::from_env().context("Failed to load configuration")?;
    if let Some(secs) = args.interval_secs {
        config.interval = Duration::from_secs(secs);
    }
    info!("{}", config.summary());

    let collector = HeatCollector::new(config).context("Failed to create collector")?;
    let mut sink = WriterSink::new(io::stdout(), args.format.into());

    if args.once {
        let report = collector
            .gather(&mut sink)
            .await
            .context("Gather cycle failed")?;
        info!(metrics = report.metrics_emitted, "Single cycle finished");
        return Ok(());
    }

    let mut ticker = interval(collector.config().interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(
        interval_secs = collector.config().interval.as_secs(),
        "Starting collection loop"
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            signal = &mut shutdown => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Shutdown requested, stopping collection loop");
                break;
            }
            () = next_cycle(&collector, &mut ticker, &mut sink) => {}
        }
    }

    info!(
        metrics_written = sink.written(),
        failed_cycles = sink.errors(),
        "Collector stopped"
    );
    Ok(())
}

/// Wait for the next tick and run one cycle; failures are already reported
/// to the sink, the loop keeps going
async fn next_cycle(
    collector: &HeatCollector,
    ticker: &mut Interval,
    sink: &mut WriterSink<Stdout>,
) {
    ticker.tick().await;
    if collector.gather(sink).await.is_err() {
        warn!("Continuing after failed cycle");
    }
}
