// ABOUTME: Data models for the MijnAurum collector
// ABOUTME: API payloads, credentials/session, collector types and emitted metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

/// MijnAurum V2 API request and response bodies
pub mod api;
/// Usage types that can be republished
pub mod collector;
/// Tagged field sets handed to sinks
pub mod metric;
/// Credentials and per-cycle session
pub mod session;

pub use api::{
    ActualRecord, ActualsResponse, AuthenticationRequest, AuthenticationResponse, PeriodUsage,
    ServerAddress, Source, SourcesResponse,
};
pub use collector::Collector;
pub use metric::Metric;
pub use session::{Credentials, Session};
