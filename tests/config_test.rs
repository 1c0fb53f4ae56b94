// ABOUTME: Tests for environment-driven collector configuration and TLS material loading
// ABOUTME: Environment-mutating tests run serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::io::Write;
use std::time::Duration;

use mijnaurum_collector::config::{env_keys, CollectorConfig, HttpClientConfig, TlsConfig};
use mijnaurum_collector::gather::HeatCollector;
use mijnaurum_collector::models::Collector;
use mijnaurum_collector::{CollectorError, ErrorKind};
use serial_test::serial;
use tempfile::NamedTempFile;

const ALL_KEYS: &[&str] = &[
    env_keys::USERNAME,
    env_keys::PASSWORD,
    env_keys::URL,
    env_keys::COLLECTORS,
    env_keys::TLS_CA,
    env_keys::TLS_CERT,
    env_keys::TLS_KEY,
    env_keys::INSECURE_SKIP_VERIFY,
    env_keys::HTTP_TIMEOUT_SECS,
    env_keys::CONNECT_TIMEOUT_SECS,
    env_keys::CYCLE_TIMEOUT_SECS,
    env_keys::INTERVAL_SECS,
];

fn clear_env() {
    for key in ALL_KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_from_env_with_credentials_only() {
    clear_env();
    env::set_var(env_keys::USERNAME, "testuser");
    env::set_var(env_keys::PASSWORD, "testpass");

    let config = CollectorConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.credentials.username(), "testuser");
    assert_eq!(config.base_url, "https://mijnaurum.nl");
    assert_eq!(config.collectors.iter().copied().collect::<Vec<_>>(), vec![Collector::Heat]);
    assert_eq!(config.http.timeout_secs, 30);
    assert_eq!(config.http.connect_timeout_secs, 10);
    assert_eq!(config.cycle_timeout, Duration::from_secs(60));
    assert_eq!(config.interval, Duration::from_secs(60));
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    env::set_var(env_keys::USERNAME, "testuser");
    env::set_var(env_keys::PASSWORD, "testpass");
    env::set_var(env_keys::URL, "http://localhost:8080//");
    env::set_var(env_keys::COLLECTORS, " heat , ");
    env::set_var(env_keys::INTERVAL_SECS, "300");
    env::set_var(env_keys::INSECURE_SKIP_VERIFY, "true");

    let config = CollectorConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.interval, Duration::from_secs(300));
    assert!(config.http.tls.insecure_skip_verify);
    assert!(!config.summary().contains("testpass"));
}

#[test]
#[serial]
fn test_from_env_missing_password() {
    clear_env();
    env::set_var(env_keys::USERNAME, "testuser");

    let err = CollectorConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(
        err,
        CollectorError::config(env_keys::PASSWORD, "cannot be empty")
    );
}

#[test]
#[serial]
fn test_from_env_unknown_collector() {
    clear_env();
    env::set_var(env_keys::USERNAME, "testuser");
    env::set_var(env_keys::PASSWORD, "testpass");
    env::set_var(env_keys::COLLECTORS, "heat,gas");

    let err = CollectorConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.kind(), ErrorKind::Config);
    let message = err.to_string();
    assert!(message.starts_with(env_keys::COLLECTORS));
    assert!(message.contains("gas"));
}

#[test]
fn test_ca_file_without_certificates_is_rejected() {
    let mut ca = NamedTempFile::new().unwrap();
    writeln!(ca, "this is not a certificate").unwrap();

    let config = CollectorConfig::new("testuser", "testpass")
        .unwrap()
        .with_http(HttpClientConfig {
            tls: TlsConfig {
                ca_path: Some(ca.path().to_path_buf()),
                ..TlsConfig::default()
            },
            ..HttpClientConfig::default()
        });

    let err = HeatCollector::new(config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_client_cert_requires_key() {
    let cert = NamedTempFile::new().unwrap();
    let config = CollectorConfig::new("testuser", "testpass")
        .unwrap()
        .with_http(HttpClientConfig {
            tls: TlsConfig {
                cert_path: Some(cert.path().to_path_buf()),
                ..TlsConfig::default()
            },
            ..HttpClientConfig::default()
        });

    let err = HeatCollector::new(config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("together"));
}
