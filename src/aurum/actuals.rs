// ABOUTME: Current-period usage retrieval from GET /user/v2/users/{userId}/actuals
// ABOUTME: The source filter is passed verbatim as the `sources` query parameter

use mijnaurum_core::constants::{endpoints, operations};
use mijnaurum_core::models::{ActualRecord, ActualsResponse, Session};
use mijnaurum_core::{CollectorError, CollectorResult};
use tracing::debug;

use super::api_client::AurumApiClient;

impl AurumApiClient {
    /// URL of the actuals endpoint for a comma-joined source filter
    ///
    /// The filter is appended literally; source ids are URL-safe and the
    /// service expects unencoded commas.
    #[must_use]
    pub fn actuals_url(&self, session: &Session, source_filter: &str) -> String {
        format!(
            "{}?sources={}",
            self.user_url(session, endpoints::ACTUALS),
            source_filter
        )
    }

    /// Fetch current-period usage for the given sources
    ///
    /// # Errors
    ///
    /// - `Transport` / `UnexpectedStatus` when the call fails
    /// - `Decode` when the body is not an `{"actuals": [...]}` envelope
    pub async fn fetch_actuals(
        &self,
        session: &Session,
        source_filter: &str,
    ) -> CollectorResult<Vec<ActualRecord>> {
        let url = self.actuals_url(session, source_filter);
        let body = self
            .get_authenticated(operations::ACTUALS, session, &url)
            .await?;

        let parsed: ActualsResponse = serde_json::from_str(&body)
            .map_err(|e| CollectorError::decode(operations::ACTUALS, &e))?;

        debug!(records = parsed.actuals.len(), "Fetched actuals");
        Ok(parsed.actuals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;

    #[test]
    fn test_actuals_url_keeps_commas() {
        let client = AurumApiClient::with_client("https://mijnaurum.nl", Client::new());
        let session = Session::new("token", "abcuserid");
        assert_eq!(
            client.actuals_url(&session, "A,B"),
            "https://mijnaurum.nl/user/v2/users/abcuserid/actuals?sources=A,B"
        );
    }
}
