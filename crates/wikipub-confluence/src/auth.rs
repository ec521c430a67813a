//! HTTP Basic authentication with an Atlassian API token.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

/// Precomputed `Authorization` header value.
#[derive(Clone)]
pub(crate) struct BasicAuth {
    header: String,
}

impl BasicAuth {
    pub(crate) fn new(username: &str, api_token: &str) -> Self {
        let credentials = BASE64_STANDARD.encode(format!("{username}:{api_token}"));
        Self {
            header: format!("Basic {credentials}"),
        }
    }

    /// Value for the `Authorization` header.
    pub(crate) fn header(&self) -> &str {
        &self.header
    }
}

// Keep the token out of debug output.
impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BasicAuth(..)")
    }
}
