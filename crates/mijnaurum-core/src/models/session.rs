// ABOUTME: Account credentials and the per-cycle session derived from them
// ABOUTME: Credentials are validated once; a session lives for exactly one gather cycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

use std::fmt;

use crate::errors::{CollectorError, CollectorResult};

/// Login name and password for one MijnAurum account
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Validate and wrap a credential pair
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when either value is empty
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> CollectorResult<Self> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() {
            return Err(CollectorError::config("username", "cannot be empty"));
        }
        if password.is_empty() {
            return Err(CollectorError::config("password", "cannot be empty"));
        }
        Ok(Self { username, password })
    }

    /// Account login name
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Account password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Token and user id returned by a successful authentication
///
/// Every call after authentication borrows the session; the gather cycle
/// consumes it with [`Session::invalidate`] once the cycle ends.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user_id: String,
}

impl Session {
    /// Assemble a session from the parts returned by the authentication endpoint
    #[must_use]
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }

    /// Value for the `Auth-Token` header
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Account user id used in per-user paths
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Drop the session at the end of a cycle
    pub fn invalidate(self) {
        drop(self);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_credentials_reject_empty_values() {
        let cases = [("", "pass"), ("user", ""), ("", "")];
        for (username, password) in cases {
            let err = Credentials::new(username, password).err();
            assert_eq!(err.map(|e| e.kind()), Some(ErrorKind::Config));
        }
        assert!(Credentials::new("user", "pass").is_ok());
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let credentials = Credentials::new("user", "hunter2").ok();
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));

        let session = Session::new("80d2255d", "abcuserid");
        let rendered = format!("{session:?}");
        assert!(rendered.contains("abcuserid"));
        assert!(!rendered.contains("80d2255d"));
    }
}
