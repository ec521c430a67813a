//! Confluence REST API client.
//!
//! Provides sync HTTP client for the Confluence REST API
//! with HTTP Basic authentication (username and API token).

mod attachments;
mod pages;

use std::time::Duration;

use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::auth::BasicAuth;
use crate::error::ConfluenceError;

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth: BasicAuth,
}

impl ConfluenceClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - Confluence base URL (e.g. `https://example.atlassian.net/wiki`)
    /// * `username` - Account name or email
    /// * `api_token` - API token (or password on Server/Data Center)
    /// * `timeout` - Global timeout applied to every request
    #[must_use]
    pub fn new(base_url: &str, username: &str, api_token: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth: BasicAuth::new(username, api_token),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Turn an error status into [`ConfluenceError::HttpResponse`], otherwise decode the JSON body.
fn read_json<T: DeserializeOwned>(
    response: ureq::http::Response<ureq::Body>,
) -> Result<T, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_string());
        return Err(ConfluenceError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader.read_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ConfluenceClient::new(
            "https://example.atlassian.net/wiki/",
            "user",
            "token",
            DEFAULT_TIMEOUT,
        );

        assert_eq!(client.base_url(), "https://example.atlassian.net/wiki");
        assert_eq!(client.api_url(), "https://example.atlassian.net/wiki/rest/api");
    }
}
