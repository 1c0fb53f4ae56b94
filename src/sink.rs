// ABOUTME: Metric and error sinks a gather cycle reports to
// ABOUTME: In-memory accumulator plus line-protocol / JSON-lines writers for the host binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

//! Output collaborators of a gather cycle
//!
//! Metrics and errors travel through separate traits. A cycle may report an
//! error without emitting any metric, and records skipped during mapping are
//! reported to neither.

use std::fmt::Write as _;
use std::io::Write;

use mijnaurum_core::models::Metric;
use mijnaurum_core::CollectorError;
use tracing::{error, warn};

/// Receives every emitted metric, one call per metric
pub trait MetricSink {
    /// Accept one metric
    fn add_metric(&mut self, metric: Metric);
}

/// Receives errors that aborted a gather cycle, one call per error
pub trait ErrorSink {
    /// Accept one error
    fn add_error(&mut self, error: &CollectorError);
}

/// In-memory sink keeping everything it receives
#[derive(Debug, Default)]
pub struct Accumulator {
    metrics: Vec<Metric>,
    errors: Vec<CollectorError>,
}

impl Accumulator {
    /// Empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics received so far
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Errors received so far
    #[must_use]
    pub fn errors(&self) -> &[CollectorError] {
        &self.errors
    }

    /// Forget everything received so far
    pub fn clear(&mut self) {
        self.metrics.clear();
        self.errors.clear();
    }
}

impl MetricSink for Accumulator {
    fn add_metric(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }
}

impl ErrorSink for Accumulator {
    fn add_error(&mut self, error: &CollectorError) {
        self.errors.push(error.clone());
    }
}

/// Serialization used by [`WriterSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `InfluxDB` line protocol
    #[default]
    Line,
    /// One JSON object per line
    Json,
}

/// Writes metrics to an `io::Write` and logs errors
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
    written: usize,
    errors: usize,
}

impl<W: Write> WriterSink<W> {
    /// Sink writing `format` lines to `writer`
    pub const fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            written: 0,
            errors: 0,
        }
    }

    /// Metrics written successfully
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Errors reported
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, metric: &Metric) -> Option<String> {
        match self.format {
            OutputFormat::Line => Some(to_line_protocol(metric)),
            OutputFormat::Json => match serde_json::to_string(metric) {
                Ok(json) => Some(json),
                Err(e) => {
                    warn!(error = %e, "Failed to serialize metric");
                    None
                }
            },
        }
    }
}

impl<W: Write> MetricSink for WriterSink<W> {
    fn add_metric(&mut self, metric: Metric) {
        let Some(line) = self.render(&metric) else {
            return;
        };
        match writeln!(self.writer, "{line}").and_then(|()| self.writer.flush()) {
            Ok(()) => self.written += 1,
            Err(e) => warn!(error = %e, metric = metric.name, "Failed to write metric"),
        }
    }
}

impl<W: Write> ErrorSink for WriterSink<W> {
    fn add_error(&mut self, err: &CollectorError) {
        self.errors += 1;
        error!(
            error.kind = %err.kind(),
            error.status = ?err.status(),
            "Gather cycle failed: {err}"
        );
    }
}

/// Render a metric as one `InfluxDB` line protocol line (without newline)
///
/// Tags are written in key order and empty tag values are left out; the
/// timestamp has nanosecond precision.
#[must_use]
pub fn to_line_protocol(metric: &Metric) -> String {
    let mut line = escape(metric.name, &[',', ' ']);

    for (key, value) in &metric.tags {
        if value.is_empty() {
            continue;
        }
        let _ = write!(
            line,
            ",{}={}",
            escape(key, &[',', '=', ' ']),
            escape(value, &[',', '=', ' '])
        );
    }

    let fields: Vec<String> = metric
        .fields
        .iter()
        .map(|(key, value)| format!("{}={value}", escape(key, &[',', '=', ' '])))
        .collect();
    let _ = write!(line, " {}", fields.join(","));

    if let Some(nanos) = metric.timestamp.timestamp_nanos_opt() {
        let _ = write!(line, " {nanos}");
    }
    line
}

fn escape(raw: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '\\' || special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
