// ABOUTME: Core types and constants for the MijnAurum heat usage collector
// ABOUTME: Foundation crate with the error taxonomy, API models and metric schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

#![deny(unsafe_code)]

//! # MijnAurum Core
//!
//! Shared types for the collector crate. Nothing here performs I/O.
//!
//! ## Modules
//!
//! - **errors**: `CollectorError` and its `ErrorKind` classification
//! - **constants**: endpoint paths, header names, timeouts and the metric schema
//! - **models**: API payloads, credentials, session, collectors and metrics

/// Error taxonomy shared by every collector component
pub mod errors;

/// Endpoint paths, header names, defaults and metric keys
pub mod constants;

/// API payloads, credentials/session, collector types and metrics
pub mod models;

pub use errors::{CollectorError, CollectorResult, ErrorKind};
