// ABOUTME: Error taxonomy for the MijnAurum collector (config, auth, transport, decode)
// ABOUTME: Every failure that aborts a gather cycle is one of these variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

use std::fmt;

/// Coarse classification of a [`CollectorError`]
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid or missing configuration, raised before any network call
    Config,
    /// Authentication endpoint rejected the credentials
    Authentication,
    /// Connection, timeout, body read or unexpected HTTP status
    Transport,
    /// Response body does not match the expected schema
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Config => "config",
            Self::Authentication => "authentication",
            Self::Transport => "transport",
            Self::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// Errors produced while configuring the collector or running a gather cycle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectorError {
    /// Configuration value missing or invalid
    #[error("{key} {reason}")]
    Config {
        /// Configuration key at fault
        key: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Authentication did not answer with HTTP 200
    #[error("statuscode from mijnaurum authentication was not 200 but {status}")]
    AuthenticationStatus {
        /// Observed HTTP status code
        status: u16,
    },

    /// Authentication answered 200 but the session cannot be established
    #[error("mijnaurum authentication returned {status} without {missing}")]
    AuthenticationIncomplete {
        /// Observed HTTP status code
        status: u16,
        /// Name of the missing session component
        missing: &'static str,
    },

    /// Network level failure during an API call
    #[error("{operation} request failed: {message}")]
    Transport {
        /// API operation in flight
        operation: &'static str,
        /// Underlying transport error message
        message: String,
    },

    /// Non-success HTTP status on an authenticated call
    #[error("{operation} request returned HTTP {status}")]
    UnexpectedStatus {
        /// API operation in flight
        operation: &'static str,
        /// Observed HTTP status code
        status: u16,
    },

    /// Cycle deadline expired
    #[error("gather cycle exceeded deadline of {timeout_secs}s during {operation}")]
    DeadlineExceeded {
        /// API operation in flight when the deadline expired
        operation: &'static str,
        /// Configured cycle deadline
        timeout_secs: u64,
    },

    /// Response body could not be decoded
    #[error("failed to decode {context} response: {reason}")]
    Decode {
        /// Which response was being decoded
        context: &'static str,
        /// Decoder message
        reason: String,
    },
}

impl CollectorError {
    /// Build a configuration error
    pub fn config(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            key,
            reason: reason.into(),
        }
    }

    /// Build a transport error from any displayable cause
    pub fn transport(operation: &'static str, cause: impl fmt::Display) -> Self {
        Self::Transport {
            operation,
            message: cause.to_string(),
        }
    }

    /// Build a decode error from a `serde_json` failure
    #[must_use]
    pub fn decode(context: &'static str, source: &serde_json::Error) -> Self {
        Self::Decode {
            context,
            reason: source.to_string(),
        }
    }

    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } => ErrorKind::Config,
            Self::AuthenticationStatus { .. } | Self::AuthenticationIncomplete { .. } => {
                ErrorKind::Authentication
            }
            Self::Transport { .. } | Self::UnexpectedStatus { .. } | Self::DeadlineExceeded { .. } => {
                ErrorKind::Transport
            }
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// HTTP status observed by the failing call, when there was one
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationStatus { status }
            | Self::AuthenticationIncomplete { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias used throughout the collector
pub type CollectorResult<T> = Result<T, CollectorError>;
