// ABOUTME: Credential exchange against POST /user/v2/authentication
// ABOUTME: Produces the per-cycle Session from the Auth-Token header and the userId body field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

use mijnaurum_core::constants::{endpoints, headers, operations};
use mijnaurum_core::models::{AuthenticationRequest, AuthenticationResponse, Credentials, Session};
use mijnaurum_core::{CollectorError, CollectorResult};
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::StatusCode;

use super::api_client::AurumApiClient;
use crate::logging::CollectorLogger;

impl AurumApiClient {
    /// Exchange credentials for a session
    ///
    /// Only HTTP 200 counts as success. The token comes from the `Auth-Token`
    /// response header, or from an `Auth-Token` cookie when the header is absent.
    ///
    /// # Errors
    ///
    /// - `AuthenticationStatus` for any status other than 200
    /// - `AuthenticationIncomplete` when a 200 response carries no token
    /// - `Decode` when the body is not JSON or has no `userId`
    /// - `Transport` when the request or body read fails
    pub async fn authenticate(&self, credentials: &Credentials) -> CollectorResult<Session> {
        let request = AuthenticationRequest {
            login_name: credentials.username(),
            password: credentials.password(),
        };

        let response = self
            .post_json(operations::AUTHENTICATE, endpoints::AUTHENTICATION, &request)
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            CollectorLogger::log_auth_event(
                credentials.username(),
                false,
                Some(status.canonical_reason().unwrap_or("unexpected status")),
            );
            return Err(CollectorError::AuthenticationStatus {
                status: status.as_u16(),
            });
        }

        let token = session_token(response.headers()).ok_or(
            CollectorError::AuthenticationIncomplete {
                status: status.as_u16(),
                missing: "session token",
            },
        )?;

        let body = response
            .text()
            .await
            .map_err(|e| CollectorError::transport(operations::AUTHENTICATE, e))?;
        let parsed: AuthenticationResponse = serde_json::from_str(&body)
            .map_err(|e| CollectorError::decode(operations::AUTHENTICATE, &e))?;
        if parsed.user_id.is_empty() {
            return Err(CollectorError::Decode {
                context: operations::AUTHENTICATE,
                reason: "userId is missing or empty".to_owned(),
            });
        }

        CollectorLogger::log_auth_event(credentials.username(), true, None);
        Ok(Session::new(token, parsed.user_id))
    }
}

/// Session token from the `Auth-Token` header, falling back to an `Auth-Token` cookie
fn session_token(response_headers: &HeaderMap) -> Option<String> {
    let from_header = response_headers
        .get(headers::AUTH_TOKEN)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = from_header {
        return Some(token.to_owned());
    }

    response_headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(cookie_token)
}

/// Value of a `Set-Cookie` header when it sets the `Auth-Token` cookie
fn cookie_token(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    if name.trim() != headers::AUTH_TOKEN {
        return None;
    }
    let value = value.trim().trim_matches('"');
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};

    #[test]
    fn test_cookie_token_parsing() {
        assert_eq!(
            cookie_token("Auth-Token=80d2255d-d4fb; Path=/; HttpOnly"),
            Some("80d2255d-d4fb".to_owned())
        );
        assert_eq!(cookie_token("Auth-Token=\"quoted\""), Some("quoted".to_owned()));
        assert_eq!(cookie_token("Other=1; Path=/"), None);
        assert_eq!(cookie_token("Auth-Token=; Path=/"), None);
        assert_eq!(cookie_token("garbage"), None);
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let mut map = HeaderMap::new();
        map.insert(SET_COOKIE, HeaderValue::from_static("Auth-Token=from-cookie"));
        assert_eq!(session_token(&map), Some("from-cookie".to_owned()));

        map.insert(
            HeaderName::from_static("auth-token"),
            HeaderValue::from_static("from-header"),
        );
        assert_eq!(session_token(&map), Some("from-header".to_owned()));
    }

    #[test]
    fn test_no_token_at_all() {
        let mut map = HeaderMap::new();
        map.insert(SET_COOKIE, HeaderValue::from_static("Other=1"));
        assert_eq!(session_token(&map), None);
    }
}
