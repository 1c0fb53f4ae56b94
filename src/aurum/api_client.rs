// ABOUTME: MijnAurum REST API client wrapping reqwest with JSON headers and session injection
// ABOUTME: Unauthenticated POST for credential exchange, authenticated GET for per-user resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

//! MijnAurum REST API client
//!
//! The V2 API is a plain request/response JSON API. Every request carries
//! `Content-Type` and `Accept` set to JSON; every request after the credential
//! exchange also carries the session token in the `Auth-Token` header.
//! The endpoint operations live next to their payload handling in
//! [`super::auth`], [`super::sources`] and [`super::actuals`].

use std::time::Instant;

use mijnaurum_core::constants::{endpoints, headers};
use mijnaurum_core::models::Session;
use mijnaurum_core::{CollectorError, CollectorResult};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Serialize;

use crate::config::HttpClientConfig;
use crate::http_client::create_client;
use crate::logging::CollectorLogger;

/// API client bound to one base URL
#[derive(Debug, Clone)]
pub struct AurumApiClient {
    base_url: String,
    client: Client,
}

impl AurumApiClient {
    /// Create a client for `base_url` with the given transport settings
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, http: &HttpClientConfig) -> CollectorResult<Self> {
        Ok(Self::with_client(base_url, create_client(http)?))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
        }
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a per-user resource: `{base}/user/v2/users/{userId}/{resource}`
    #[must_use]
    pub fn user_url(&self, session: &Session, resource: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.base_url,
            endpoints::USERS,
            session.user_id(),
            resource
        )
    }

    /// POST a JSON body without session header
    ///
    /// The response is returned whatever its status; the caller decides what
    /// counts as success.
    ///
    /// # Errors
    ///
    /// Returns a `Transport` error when the request cannot be sent
    pub(crate) async fn post_json<B>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> CollectorResult<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, headers::APPLICATION_JSON)
            .header(ACCEPT, headers::APPLICATION_JSON)
            .json(body)
            .send()
            .await
            .map_err(|e| CollectorError::transport(operation, e))?;

        CollectorLogger::log_api_call(
            operation,
            "POST",
            response.status().as_u16(),
            elapsed_ms(started),
        );
        Ok(response)
    }

    /// GET a fully built URL with the session header and return the body text
    ///
    /// # Errors
    ///
    /// Returns a `Transport` error when the request fails, the status is not a
    /// success, or the body cannot be read
    pub(crate) async fn get_authenticated(
        &self,
        operation: &'static str,
        session: &Session,
        url: &str,
    ) -> CollectorResult<String> {
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, headers::APPLICATION_JSON)
            .header(ACCEPT, headers::APPLICATION_JSON)
            .header(headers::AUTH_TOKEN, session.token())
            .send()
            .await
            .map_err(|e| CollectorError::transport(operation, e))?;

        let status = response.status();
        CollectorLogger::log_api_call(operation, "GET", status.as_u16(), elapsed_ms(started));

        if !status.is_success() {
            return Err(CollectorError::UnexpectedStatus {
                operation,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| CollectorError::transport(operation, e))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = AurumApiClient::with_client("https://mijnaurum.nl/", Client::new());
        assert_eq!(client.base_url(), "https://mijnaurum.nl");
    }

    #[test]
    fn test_user_url() {
        let client = AurumApiClient::with_client("http://localhost:1234", Client::new());
        let session = Session::new("token", "abcuserid");
        assert_eq!(
            client.user_url(&session, "sources"),
            "http://localhost:1234/user/v2/users/abcuserid/sources"
        );
    }
}
