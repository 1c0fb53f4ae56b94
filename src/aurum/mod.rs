// ABOUTME: MijnAurum V2 API integration: client, authentication, catalog, actuals and mapping
// ABOUTME: Each module owns one step of the authenticate → sources → actuals pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

//! MijnAurum API integration
//!
//! A gather cycle talks to three endpoints, strictly in this order:
//!
//! 1. `POST /user/v2/authentication` exchanges credentials for a [`Session`]
//! 2. `GET /user/v2/users/{userId}/sources` lists the metering sources
//! 3. `GET /user/v2/users/{userId}/actuals?sources=...` returns current usage
//!
//! [`converters`] then joins each actual record with the catalog entry of the
//! same type.
//!
//! [`Session`]: mijnaurum_core::models::Session

/// Actuals endpoint
pub mod actuals;
/// REST client wrapper with JSON and session headers
pub mod api_client;
/// Credential exchange
pub mod auth;
/// Actual record to metric mapping
pub mod converters;
/// Source catalog endpoint and per-cycle index
pub mod sources;

pub use api_client::AurumApiClient;
pub use converters::{map_to_metrics, MappingOutcome};
pub use sources::{source_filter, SourceCatalog};
