// ABOUTME: Gather cycle orchestrator: authenticate, fetch catalog, fetch actuals, map, emit
// ABOUTME: Owns the per-cycle session, enforces the cycle deadline and reports failures once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

//! Heat usage collector
//!
//! One call to [`HeatCollector::gather`] is one collection cycle. The cycle is
//! strictly sequential and keeps nothing between calls: every cycle starts
//! with a fresh credential exchange and drops its session when it ends,
//! whatever the outcome.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::Utc;
use mijnaurum_core::constants::operations;
use mijnaurum_core::models::Session;
use mijnaurum_core::{CollectorError, CollectorResult};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::aurum::{map_to_metrics, AurumApiClient, MappingOutcome, SourceCatalog};
use crate::config::CollectorConfig;
use crate::sink::{ErrorSink, MetricSink};

/// Step of a gather cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// No cycle in flight
    Idle,
    /// Exchanging credentials for a session
    Authenticating,
    /// Listing metering sources
    CatalogFetching,
    /// Fetching current usage
    ActualsFetching,
    /// Joining records with catalog metadata
    Mapping,
    /// Cycle aborted
    Failed,
}

impl CyclePhase {
    /// Operation name used in errors raised during this phase
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::Authenticating => operations::AUTHENTICATE,
            Self::CatalogFetching => operations::SOURCES,
            Self::ActualsFetching => operations::ACTUALS,
            Self::Mapping => "mapping",
            Self::Idle | Self::Failed => "gather",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Authenticating => "authenticating",
            Self::CatalogFetching => "catalog_fetching",
            Self::ActualsFetching => "actuals_fetching",
            Self::Mapping => "mapping",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Counters of one successful cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatherReport {
    /// Metrics handed to the sink
    pub metrics_emitted: usize,
    /// Records of a type no enabled collector handles
    pub filtered: usize,
    /// Records skipped for lack of a catalog source of their type
    pub unmapped: usize,
    /// Catalog sources shadowed by an earlier source of the same type
    pub duplicate_types: usize,
    /// Catalog size
    pub sources: usize,
}

struct CycleOutput {
    outcome: MappingOutcome,
    sources: usize,
    duplicate_types: usize,
}

/// Collector instance: validated configuration plus an HTTP client
///
/// Holds no session state, so one instance may run any number of cycles one
/// after the other.
#[derive(Debug, Clone)]
pub struct HeatCollector {
    config: CollectorConfig,
    client: AurumApiClient,
}

impl HeatCollector {
    /// Validate the configuration and build the HTTP client
    ///
    /// No network call is made.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for invalid settings or unusable TLS material
    pub fn new(config: CollectorConfig) -> CollectorResult<Self> {
        config.validate()?;
        let client = AurumApiClient::new(&config.base_url, &config.http)?;
        Ok(Self { config, client })
    }

    /// Configuration this collector runs with
    #[must_use]
    pub const fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Run one collection cycle
    ///
    /// Metrics reach `sink` only once the whole pipeline succeeded. A failure
    /// at any step aborts the cycle, is reported to `sink` exactly once and is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns the error that aborted the cycle
    pub async fn gather<S>(&self, sink: &mut S) -> CollectorResult<GatherReport>
    where
        S: MetricSink + ErrorSink + Send + ?Sized,
    {
        let span = info_span!("gather", cycle_id = %Uuid::new_v4());
        self.gather_cycle(sink).instrument(span).await
    }

    async fn gather_cycle<S>(&self, sink: &mut S) -> CollectorResult<GatherReport>
    where
        S: MetricSink + ErrorSink + Send + ?Sized,
    {
        let started = Instant::now();
        let mut phase = CyclePhase::Idle;
        let deadline = self.config.cycle_timeout;

        let result = tokio::time::timeout(deadline, self.run_cycle(&mut phase))
            .await
            .unwrap_or_else(|_| Err(deadline_exceeded(phase, deadline)));

        match result {
            Ok(output) => {
                let report = GatherReport {
                    metrics_emitted: output.outcome.metrics.len(),
                    filtered: output.outcome.filtered,
                    unmapped: output.outcome.unmapped,
                    duplicate_types: output.duplicate_types,
                    sources: output.sources,
                };
                for metric in output.outcome.metrics {
                    sink.add_metric(metric);
                }
                info!(
                    metrics = report.metrics_emitted,
                    filtered = report.filtered,
                    unmapped = report.unmapped,
                    sources = report.sources,
                    duration_ms = elapsed_ms(started),
                    "Gather cycle completed"
                );
                Ok(report)
            }
            Err(err) => {
                debug!(
                    phase = %phase,
                    error.kind = %err.kind(),
                    duration_ms = elapsed_ms(started),
                    "Gather cycle aborted: {err}"
                );
                enter(&mut phase, CyclePhase::Failed);
                sink.add_error(&err);
                Err(err)
            }
        }
    }

    async fn run_cycle(&self, phase: &mut CyclePhase) -> CollectorResult<CycleOutput> {
        enter(phase, CyclePhase::Authenticating);
        let session = self.client.authenticate(&self.config.credentials).await?;

        let result = self.collect(&session, phase).await;
        session.invalidate();
        result
    }

    async fn collect(
        &self,
        session: &Session,
        phase: &mut CyclePhase,
    ) -> CollectorResult<CycleOutput> {
        enter(phase, CyclePhase::CatalogFetching);
        let catalog = SourceCatalog::new(self.client.fetch_sources(session).await?);

        enter(phase, CyclePhase::ActualsFetching);
        let records = self
            .client
            .fetch_actuals(session, &catalog.source_filter())
            .await?;

        enter(phase, CyclePhase::Mapping);
        let outcome = map_to_metrics(&records, &catalog, &self.config.collectors, Utc::now());

        enter(phase, CyclePhase::Idle);
        Ok(CycleOutput {
            outcome,
            sources: catalog.len(),
            duplicate_types: catalog.duplicate_types(),
        })
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn enter(phase: &mut CyclePhase, next: CyclePhase) {
    debug!(from = %phase, to = %next, "Gather phase transition");
    *phase = next;
}

fn deadline_exceeded(phase: CyclePhase, deadline: Duration) -> CollectorError {
    CollectorError::DeadlineExceeded {
        operation: phase.operation(),
        timeout_secs: deadline.as_secs(),
    }
}
