// ABOUTME: Configuration module for the collector and its host binary
// ABOUTME: Environment-only loading; no configuration files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

/// Collector configuration from environment variables
pub mod environment;

pub use environment::{env_keys, CollectorConfig, HttpClientConfig, TlsConfig};
