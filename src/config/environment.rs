// ABOUTME: Collector configuration with environment variable loading and validation
// ABOUTME: Credentials, base URL, enabled collectors, HTTP/TLS transport settings and deadlines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

use std::collections::BTreeSet;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use mijnaurum_core::constants::{endpoints, timeouts};
use mijnaurum_core::models::{Collector, Credentials};
use mijnaurum_core::{CollectorError, CollectorResult};
use tracing::info;
use url::Url;

/// Environment variable names
pub mod env_keys {
    /// Account login name
    pub const USERNAME: &str = "MIJNAURUM_USERNAME";
    /// Account password
    pub const PASSWORD: &str = "MIJNAURUM_PASSWORD";
    /// API base URL
    pub const URL: &str = "MIJNAURUM_URL";
    /// Comma separated list of enabled collectors
    pub const COLLECTORS: &str = "MIJNAURUM_COLLECTORS";
    /// PEM bundle of extra trusted roots
    pub const TLS_CA: &str = "MIJNAURUM_TLS_CA";
    /// PEM client certificate
    pub const TLS_CERT: &str = "MIJNAURUM_TLS_CERT";
    /// PEM client private key
    pub const TLS_KEY: &str = "MIJNAURUM_TLS_KEY";
    /// Accept invalid server certificates
    pub const INSECURE_SKIP_VERIFY: &str = "MIJNAURUM_INSECURE_SKIP_VERIFY";
    /// Per-request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "MIJNAURUM_HTTP_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: &str = "MIJNAURUM_CONNECT_TIMEOUT_SECS";
    /// Gather cycle deadline in seconds
    pub const CYCLE_TIMEOUT_SECS: &str = "MIJNAURUM_CYCLE_TIMEOUT_SECS";
    /// Interval between cycles in seconds
    pub const INTERVAL_SECS: &str = "MIJNAURUM_INTERVAL_SECS";
}

/// TLS settings applied to the HTTP client as-is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    /// Extra trusted root certificates (PEM)
    pub ca_path: Option<PathBuf>,
    /// Client certificate (PEM)
    pub cert_path: Option<PathBuf>,
    /// Client private key (PEM)
    pub key_path: Option<PathBuf>,
    /// Skip server certificate verification
    pub insecure_skip_verify: bool,
}

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// TLS settings
    pub tls: TlsConfig,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: timeouts::HTTP_REQUEST_SECS,
            connect_timeout_secs: timeouts::HTTP_CONNECT_SECS,
            tls: TlsConfig::default(),
        }
    }
}

/// Everything one collector instance needs
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Account credentials
    pub credentials: Credentials,
    /// API base URL without trailing slash
    pub base_url: String,
    /// Usage types turned into metrics
    pub collectors: BTreeSet<Collector>,
    /// HTTP transport settings
    pub http: HttpClientConfig,
    /// Deadline for one gather cycle
    pub cycle_timeout: Duration,
    /// Interval between cycles when run by the host binary
    pub interval: Duration,
}

impl CollectorConfig {
    /// Configuration with default URL, collectors and timeouts
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when the username or password is empty
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> CollectorResult<Self> {
        Ok(Self {
            credentials: Credentials::new(username, password)?,
            base_url: endpoints::DEFAULT_BASE_URL.to_owned(),
            collectors: Collector::AVAILABLE.iter().copied().collect(),
            http: HttpClientConfig::default(),
            cycle_timeout: Duration::from_secs(timeouts::CYCLE_SECS),
            interval: Duration::from_secs(timeouts::INTERVAL_SECS),
        })
    }

    /// Point the collector at another host
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Replace the enabled collectors; an empty list enables every available one
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for unknown collector names
    pub fn with_collectors<I, S>(mut self, names: I) -> CollectorResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.collectors = Collector::parse_set(names)?;
        Ok(self)
    }

    /// Replace the HTTP transport settings
    #[must_use]
    pub fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Replace the cycle deadline
    #[must_use]
    pub const fn with_cycle_timeout(mut self, cycle_timeout: Duration) -> Self {
        self.cycle_timeout = cycle_timeout;
        self
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `Config` error naming the offending variable
    pub fn from_env() -> CollectorResult<Self> {
        info!("Loading collector configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns a `Config` error naming the offending variable
    pub fn from_lookup<F>(lookup: F) -> CollectorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup(env_keys::USERNAME).unwrap_or_default();
        let password = lookup(env_keys::PASSWORD).unwrap_or_default();
        let credentials = Credentials::new(username, password).map_err(|e| match e {
            CollectorError::Config { key: "username", .. } => {
                CollectorError::config(env_keys::USERNAME, "cannot be empty")
            }
            CollectorError::Config { key: "password", .. } => {
                CollectorError::config(env_keys::PASSWORD, "cannot be empty")
            }
            other => other,
        })?;

        let base_url = lookup(env_keys::URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| endpoints::DEFAULT_BASE_URL.to_owned());

        let collectors = lookup(env_keys::COLLECTORS)
            .map(|list| parse_list(&list))
            .unwrap_or_default();
        let collectors = Collector::parse_set(&collectors)
            .map_err(|e| CollectorError::config(env_keys::COLLECTORS, config_reason(e)))?;

        let http = HttpClientConfig {
            timeout_secs: parse_or(&lookup, env_keys::HTTP_TIMEOUT_SECS, timeouts::HTTP_REQUEST_SECS)?,
            connect_timeout_secs: parse_or(
                &lookup,
                env_keys::CONNECT_TIMEOUT_SECS,
                timeouts::HTTP_CONNECT_SECS,
            )?,
            tls: TlsConfig {
                ca_path: path_var(&lookup, env_keys::TLS_CA),
                cert_path: path_var(&lookup, env_keys::TLS_CERT),
                key_path: path_var(&lookup, env_keys::TLS_KEY),
                insecure_skip_verify: parse_or(&lookup, env_keys::INSECURE_SKIP_VERIFY, false)?,
            },
        };

        let config = Self {
            credentials,
            base_url: String::new(),
            collectors,
            http,
            cycle_timeout: Duration::from_secs(parse_or(
                &lookup,
                env_keys::CYCLE_TIMEOUT_SECS,
                timeouts::CYCLE_SECS,
            )?),
            interval: Duration::from_secs(parse_or(
                &lookup,
                env_keys::INTERVAL_SECS,
                timeouts::INTERVAL_SECS,
            )?),
        }
        .with_base_url(base_url);

        config.validate()?;
        info!("Collector configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `Config` error describing the first invalid value
    pub fn validate(&self) -> CollectorResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| CollectorError::config("base_url", format!("is not a valid URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CollectorError::config(
                "base_url",
                format!("must use http or https, got '{}'", url.scheme()),
            ));
        }

        if self.collectors.is_empty() {
            return Err(CollectorError::config("collectors", "cannot be empty"));
        }

        if self.http.timeout_secs == 0 || self.http.connect_timeout_secs == 0 {
            return Err(CollectorError::config("http timeout", "must be greater than 0"));
        }

        if self.cycle_timeout.is_zero() {
            return Err(CollectorError::config("cycle_timeout", "must be greater than 0"));
        }

        if self.interval.is_zero() {
            return Err(CollectorError::config("interval", "must be greater than 0"));
        }

        if self.http.tls.cert_path.is_some() != self.http.tls.key_path.is_some() {
            return Err(CollectorError::config(
                "tls",
                "client certificate and key must be configured together",
            ));
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let collectors: Vec<&str> = self.collectors.iter().map(|c| c.as_str()).collect();
        format!(
            "MijnAurum Collector Configuration:\n\
             - Base URL: {}\n\
             - Username: {}\n\
             - Collectors: {}\n\
             - HTTP Timeout: {}s (connect {}s)\n\
             - TLS CA: {}\n\
             - TLS Client Identity: {}\n\
             - Insecure Skip Verify: {}\n\
             - Cycle Deadline: {}s\n\
             - Interval: {}s",
            self.base_url,
            self.credentials.username(),
            collectors.join(","),
            self.http.timeout_secs,
            self.http.connect_timeout_secs,
            if self.http.tls.ca_path.is_some() {
                "Custom"
            } else {
                "System"
            },
            if self.http.tls.cert_path.is_some() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.http.tls.insecure_skip_verify,
            self.cycle_timeout.as_secs(),
            self.interval.as_secs()
        )
    }
}

/// Reason part of a config error, for re-keying it
fn config_reason(err: CollectorError) -> String {
    match err {
        CollectorError::Config { reason, .. } => reason,
        other => other.to_string(),
    }
}

/// Parse an optional variable, falling back to `default` when unset or blank
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> CollectorResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| CollectorError::config(key, format!("has invalid value '{raw}': {e}"))),
        _ => Ok(default),
    }
}

/// Optional path variable; blank counts as unset
fn path_var<F>(lookup: &F, key: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Parse a comma separated list
fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("heat, ,  water"), vec!["heat", "water"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_from_lookup_defaults() {
        let lookup = lookup_from(&[
            (env_keys::USERNAME, "testuser"),
            (env_keys::PASSWORD, "testpass"),
        ]);
        let Ok(config) = CollectorConfig::from_lookup(lookup) else {
            panic!("configuration should load");
        };
        assert_eq!(config.base_url, "https://mijnaurum.nl");
        assert_eq!(config.collectors, BTreeSet::from([Collector::Heat]));
        assert_eq!(config.http, HttpClientConfig::default());
        assert_eq!(config.cycle_timeout, Duration::from_secs(60));
        assert_eq!(config.interval, Duration::from_secs(60));
    }

    #[test]
    fn test_from_lookup_names_missing_variable() {
        let lookup = lookup_from(&[(env_keys::PASSWORD, "testpass")]);
        let err = CollectorConfig::from_lookup(lookup).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("MIJNAURUM_USERNAME cannot be empty".to_owned())
        );
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let lookup = lookup_from(&[
            (env_keys::USERNAME, "u"),
            (env_keys::PASSWORD, "p"),
            (env_keys::HTTP_TIMEOUT_SECS, "soon"),
        ]);
        let message = CollectorConfig::from_lookup(lookup)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(message.starts_with("MIJNAURUM_HTTP_TIMEOUT_SECS has invalid value 'soon'"));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let lookup = lookup_from(&[
            (env_keys::USERNAME, "u"),
            (env_keys::PASSWORD, "p"),
            (env_keys::URL, "http://localhost:8080/"),
            (env_keys::COLLECTORS, "heat"),
            (env_keys::INSECURE_SKIP_VERIFY, "true"),
            (env_keys::CYCLE_TIMEOUT_SECS, "15"),
        ]);
        let Ok(config) = CollectorConfig::from_lookup(lookup) else {
            panic!("configuration should load");
        };
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.http.tls.insecure_skip_verify);
        assert_eq!(config.cycle_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_validate_rejects_lonely_client_cert() {
        let Ok(mut config) = CollectorConfig::new("u", "p") else {
            panic!("credentials are valid");
        };
        config.http.tls.cert_path = Some(PathBuf::from("/etc/client.pem"));
        assert!(config.validate().is_err());
        config.http.tls.key_path = Some(PathBuf::from("/etc/client.key"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let Ok(config) = CollectorConfig::new("u", "p") else {
            panic!("credentials are valid");
        };
        assert!(config.with_base_url("ftp://mijnaurum.nl").validate().is_err());
    }

    #[test]
    fn test_summary_hides_password() {
        let Ok(config) = CollectorConfig::new("someone", "topsecret") else {
            panic!("credentials are valid");
        };
        let summary = config.summary();
        assert!(summary.contains("someone"));
        assert!(summary.contains("heat"));
        assert!(!summary.contains("topsecret"));
    }
}
