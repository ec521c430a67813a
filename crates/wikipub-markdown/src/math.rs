//! LaTeX to SVG rendering.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use ureq::Agent;

use crate::http::{DEFAULT_TIMEOUT, create_agent, get_bytes};

/// Math rendering error.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    #[error("math renderer request failed: {0}")]
    Http(String),
    #[error("math renderer returned non UTF-8 output")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("math renderer returned no SVG markup for {0:?}")]
    InvalidSvg(String),
}

/// Renders LaTeX expressions into SVG markup.
pub trait MathRenderer {
    /// Render `latex`. `display` is true for block (`$$`) math.
    fn render(&self, latex: &str, display: bool) -> Result<String, MathError>;
}

/// [`MathRenderer`] backed by an HTTP service taking the expression as query string
/// (`{base_url}?{latex}`), such as `https://latex.codecogs.com/svg.image`.
pub struct HttpMathRenderer {
    agent: Agent,
    base_url: String,
}

impl HttpMathRenderer {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: create_agent(DEFAULT_TIMEOUT),
            base_url: base_url.to_owned(),
        }
    }

    /// Replace the HTTP agent (e.g. to change the timeout).
    #[must_use]
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    /// Request URL for `latex`.
    #[must_use]
    pub fn url_for(&self, latex: &str, display: bool) -> String {
        let expression = if display {
            format!("\\displaystyle {}", latex.trim())
        } else {
            latex.trim().to_owned()
        };
        format!(
            "{}?{}",
            self.base_url,
            utf8_percent_encode(&expression, NON_ALPHANUMERIC)
        )
    }
}

impl MathRenderer for HttpMathRenderer {
    fn render(&self, latex: &str, display: bool) -> Result<String, MathError> {
        let url = self.url_for(latex, display);
        let mode = if display { "display" } else { "inline" };
        tracing::info!(mode, "Rendering math expression");

        let data = get_bytes(&self.agent, &url).map_err(MathError::Http)?;
        let svg = String::from_utf8(data)?;

        if !svg.contains("<svg") {
            return Err(MathError::InvalidSvg(latex.to_owned()));
        }
        Ok(svg)
    }
}
