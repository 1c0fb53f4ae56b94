// ABOUTME: MijnAurum V2 API payloads (authentication, sources, actuals)
// ABOUTME: Absent or null numbers decode to zero, absent strings to empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

//! MijnAurum API data models
//!
//! These structures mirror the JSON bodies returned by the `user/v2` endpoints.
//! The service omits or nulls fields freely, so every scalar falls back to its
//! default value instead of failing the decode.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` the same way as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Credential exchange request body
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticationRequest<'a> {
    /// Account login name
    #[serde(rename = "loginName")]
    pub login_name: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Credential exchange response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthenticationResponse {
    /// Identifier used in every per-user path
    #[serde(rename = "userId", default, deserialize_with = "null_as_default")]
    pub user_id: String,
}

/// A metering point attached to the account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Source identifier, used in the actuals filter
    #[serde(rename = "source", default, deserialize_with = "null_as_default")]
    pub source_id: String,
    /// Usage type, e.g. `heat`
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub source_type: String,
    /// Unit of the measured quantity (e.g. `GJ`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    /// Unit of the measured rate (e.g. `J/h`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub rate_unit: String,
    /// Physical meter identifier
    #[serde(rename = "meterId", default, deserialize_with = "null_as_default")]
    pub meter_id: String,
    /// Location identifier
    #[serde(rename = "locationId", default, deserialize_with = "null_as_default")]
    pub location_id: String,
    /// Whether the portal shows this source by default
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_default: bool,
}

/// Server address advertised next to the source catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerAddress {
    /// Address as sent by the service
    #[serde(rename = "serverAddress", default, deserialize_with = "null_as_default")]
    pub server_address: String,
}

/// Envelope of `GET /user/v2/users/{userId}/sources`
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesResponse {
    /// Catalog in service order
    pub sources: Vec<Source>,
    /// Informational, unused by the collector
    #[serde(rename = "serverAddresses", default, deserialize_with = "null_as_default")]
    pub server_addresses: Vec<ServerAddress>,
}

/// Usage and cost accumulated over one period
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PeriodUsage {
    /// Consumed quantity, in the source unit
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: f64,
    /// Cost of the consumed quantity
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost: f64,
}

/// Current-period usage of one source
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualRecord {
    /// Source identifier
    #[serde(rename = "source", default, deserialize_with = "null_as_default")]
    pub source_id: String,
    /// Usage type, e.g. `heat`
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub source_type: String,
    /// Reference consumption
    #[serde(default, deserialize_with = "null_as_default")]
    pub baseline: f64,
    /// Raw measurements, passed through untouched
    #[serde(default, deserialize_with = "null_as_default")]
    pub measurements: Vec<serde_json::Value>,
    /// Today so far
    #[serde(default, deserialize_with = "null_as_default")]
    pub this_day: PeriodUsage,
    /// This week so far
    #[serde(default, deserialize_with = "null_as_default")]
    pub this_week: PeriodUsage,
    /// This month so far
    #[serde(default, deserialize_with = "null_as_default")]
    pub this_month: PeriodUsage,
    /// This year so far
    #[serde(default, deserialize_with = "null_as_default")]
    pub this_year: PeriodUsage,
}

/// Envelope of `GET /user/v2/users/{userId}/actuals`
#[derive(Debug, Clone, Deserialize)]
pub struct ActualsResponse {
    /// One record per source
    pub actuals: Vec<ActualRecord>,
}
