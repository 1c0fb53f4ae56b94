// ABOUTME: HTTP client construction with timeouts and TLS settings from configuration
// ABOUTME: One client per collector instance; connection pooling is handled by reqwest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

use std::fs;
use std::path::Path;
use std::time::Duration;

use mijnaurum_core::{CollectorError, CollectorResult};
use reqwest::{Certificate, Client, ClientBuilder, Identity};
use tracing::warn;

use crate::config::{HttpClientConfig, TlsConfig};

/// User agent sent with every request
const USER_AGENT: &str = concat!("mijnaurum-collector/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client for one collector instance
///
/// # Errors
///
/// Returns a `Config` error when a TLS file cannot be read or parsed, or when
/// the client cannot be built with the requested settings
pub fn create_client(config: &HttpClientConfig) -> CollectorResult<Client> {
    let builder = ClientBuilder::new()
        .use_rustls_tls()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

    apply_tls(builder, &config.tls)?
        .build()
        .map_err(|e| CollectorError::config("http client", e.to_string()))
}

/// Apply CA bundle, client identity and verification settings
fn apply_tls(mut builder: ClientBuilder, tls: &TlsConfig) -> CollectorResult<ClientBuilder> {
    if let Some(ca_path) = &tls.ca_path {
        let pem = read_pem("tls_ca", ca_path)?;
        let certificates = Certificate::from_pem_bundle(&pem)
            .map_err(|e| CollectorError::config("tls_ca", format!("is not a PEM bundle: {e}")))?;
        if certificates.is_empty() {
            return Err(CollectorError::config("tls_ca", "contains no certificates"));
        }
        for certificate in certificates {
            builder = builder.add_root_certificate(certificate);
        }
    }

    if let (Some(cert_path), Some(key_path)) = (&tls.cert_path, &tls.key_path) {
        let mut pem = read_pem("tls_cert", cert_path)?;
        pem.push(b'\n');
        pem.extend(read_pem("tls_key", key_path)?);
        let identity = Identity::from_pem(&pem).map_err(|e| {
            CollectorError::config("tls_cert", format!("is not a usable client identity: {e}"))
        })?;
        builder = builder.identity(identity);
    }

    if tls.insecure_skip_verify {
        warn!("TLS certificate verification is disabled for the MijnAurum API");
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder)
}

fn read_pem(key: &'static str, path: &Path) -> CollectorResult<Vec<u8>> {
    fs::read(path)
        .map_err(|e| CollectorError::config(key, format!("cannot read {}: {e}", path.display())))
}
