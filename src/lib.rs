// ABOUTME: Main library entry point for the MijnAurum heat usage collector
// ABOUTME: Polls the MijnAurum V2 API and republishes heat usage actuals as tagged metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

#![deny(unsafe_code)]

//! # MijnAurum Collector
//!
//! Collects current heat usage from a MijnAurum account. Each collection
//! cycle authenticates, lists the account's metering sources, fetches the
//! current-period actuals for all of them and emits one `heat usage` metric
//! per heat record, tagged with the metadata of the matching source.
//!
//! ## Architecture
//!
//! - **aurum**: REST client, credential exchange, catalog and actuals endpoints, mapping
//! - **gather**: the cycle orchestrator owning the per-cycle session
//! - **sink**: metric and error sinks (in-memory, line protocol, JSON lines)
//! - **config**: environment-driven configuration with validation
//! - **`http_client`**: reqwest client construction with TLS settings
//! - **logging**: `tracing` subscriber setup and structured log events
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mijnaurum_collector::config::CollectorConfig;
//! use mijnaurum_collector::gather::HeatCollector;
//! use mijnaurum_collector::sink::Accumulator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let collector = HeatCollector::new(CollectorConfig::from_env()?)?;
//!     let mut acc = Accumulator::new();
//!     let report = collector.gather(&mut acc).await?;
//!     println!("emitted {} metrics", report.metrics_emitted);
//!     Ok(())
//! }
//! ```

/// MijnAurum V2 API integration
pub mod aurum;

/// Environment-driven configuration
pub mod config;

/// Gather cycle orchestration
pub mod gather;

/// HTTP client construction
pub mod http_client;

/// Logging setup and structured log events
pub mod logging;

/// Metric and error sinks
pub mod sink;

pub use mijnaurum_core::{constants, models, CollectorError, CollectorResult, ErrorKind};
