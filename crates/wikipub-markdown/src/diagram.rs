//! Diagram rendering via a mermaid rendering service.
//!
//! The diagram source is base64-encoded into the URL path of a GET request;
//! the response body is the rendered PNG.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use ureq::Agent;

use crate::http::{DEFAULT_TIMEOUT, create_agent, get_bytes};

/// Supported diagram languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramLanguage {
    Mermaid,
}

impl DiagramLanguage {
    /// Parse language from code fence info string.
    ///
    /// Returns None if the language is not a supported diagram type.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mermaid" => Some(Self::Mermaid),
            _ => None,
        }
    }

    /// Language name as written in code fences.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
        }
    }
}

/// Diagram rendering error.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("{language} diagram service request failed: {message}")]
    Http {
        language: &'static str,
        message: String,
    },
    #[error("{language} diagram service returned an empty body")]
    EmptyResponse { language: &'static str },
}

/// Renders diagram source into image bytes.
pub trait DiagramRenderer {
    /// Render `source` written in `language` to PNG bytes.
    fn render(&self, language: DiagramLanguage, source: &str) -> Result<Vec<u8>, DiagramError>;
}

/// [`DiagramRenderer`] backed by a mermaid.ink compatible service.
pub struct MermaidInkRenderer {
    agent: Agent,
    base_url: String,
}

impl MermaidInkRenderer {
    /// Create a renderer for the service at `base_url` (e.g. `https://mermaid.ink/img`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: create_agent(DEFAULT_TIMEOUT),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Replace the HTTP agent (e.g. to change the timeout).
    #[must_use]
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    /// Request URL for `source`.
    #[must_use]
    pub fn url_for(&self, source: &str) -> String {
        let encoded = BASE64_STANDARD.encode(source.as_bytes());
        format!(
            "{}/{}?type=png",
            self.base_url,
            utf8_percent_encode(&encoded, NON_ALPHANUMERIC)
        )
    }
}

impl DiagramRenderer for MermaidInkRenderer {
    fn render(&self, language: DiagramLanguage, source: &str) -> Result<Vec<u8>, DiagramError> {
        let url = self.url_for(source);
        tracing::info!(language = language.as_str(), "Rendering diagram");

        let data = get_bytes(&self.agent, &url).map_err(|message| DiagramError::Http {
            language: language.as_str(),
            message,
        })?;

        if data.is_empty() {
            return Err(DiagramError::EmptyResponse {
                language: language.as_str(),
            });
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!(DiagramLanguage::parse("mermaid"), Some(DiagramLanguage::Mermaid));
        assert_eq!(DiagramLanguage::parse("rust"), None);
        assert_eq!(DiagramLanguage::parse(""), None);
        assert_eq!(DiagramLanguage::parse("Mermaid"), None);
    }

    #[test]
    fn test_url_encodes_base64_source() {
        let renderer = MermaidInkRenderer::new("https://mermaid.ink/img/");
        // base64("graph TD") = "Z3JhcGggVEQ="
        assert_eq!(
            renderer.url_for("graph TD"),
            "https://mermaid.ink/img/Z3JhcGggVEQ%3D?type=png"
        );
    }

    #[test]
    fn test_url_escapes_base64_specials() {
        let renderer = MermaidInkRenderer::new("https://mermaid.ink/img");
        let url = renderer.url_for("A-->B\n???");
        let path = url
            .strip_prefix("https://mermaid.ink/img/")
            .and_then(|rest| rest.strip_suffix("?type=png"))
            .unwrap();
        assert!(path.chars().all(|c| c.is_ascii_alphanumeric() || c == '%'));
    }

    #[test]
    fn test_error_display() {
        let err = DiagramError::Http {
            language: "mermaid",
            message: "HTTP 400: bad diagram".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "mermaid diagram service request failed: HTTP 400: bad diagram"
        );
    }
}
