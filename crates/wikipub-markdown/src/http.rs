//! Shared HTTP plumbing for the rendering services.

use std::time::Duration;

use ureq::Agent;

/// Default HTTP timeout for rendering requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create HTTP agent with the specified timeout.
///
/// Status codes are returned as responses rather than errors so that the
/// caller can include the response body in its error.
#[must_use]
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Perform a GET request and return the body bytes, or `Err(message)`.
pub(crate) fn get_bytes(agent: &Agent, url: &str) -> Result<Vec<u8>, String> {
    let response = agent.get(url).call().map_err(|e| e.to_string())?;

    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| String::from("(unable to read error body)"));
        return Err(format!("HTTP {status}: {error_body}"));
    }

    body.read_to_vec().map_err(|e| e.to_string())
}
