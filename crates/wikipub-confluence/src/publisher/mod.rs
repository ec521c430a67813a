//! Publishing of markdown documents to Confluence.
//!
//! This module provides the [`Publisher`] struct that runs the whole
//! workflow for one document:
//!
//! 1. Convert markdown to storage format, rendering diagrams and math
//! 2. Resolve the parent page and create or update the page
//! 3. Upload the collected assets as attachments
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use wikipub_confluence::{ConfluenceClient, DEFAULT_TIMEOUT, PublishConfig, Publisher};
//! use wikipub_markdown::{AssetCache, Document, DocumentConverter, HttpMathRenderer, MermaidInkRenderer};
//!
//! let client = ConfluenceClient::new(
//!     "https://example.atlassian.net/wiki",
//!     "user@example.com",
//!     "api-token",
//!     DEFAULT_TIMEOUT,
//! );
//! let diagrams = MermaidInkRenderer::new("https://mermaid.ink/img");
//! let math = HttpMathRenderer::new("https://latex.codecogs.com/svg.image");
//! let cache = AssetCache::new(".wikipub/cache");
//! let converter = DocumentConverter::new(&diagrams, &math, &cache);
//! let config = PublishConfig {
//!     space_key: "DOCS".to_owned(),
//!     default_parent_id: None,
//! };
//! let publisher = Publisher::new(&client, converter, config);
//!
//! let document = Document::load(Path::new("docs"), "guides/setup.md")?;
//! let result = publisher.publish(&document)?;
//! println!("{} {} (v{})", result.action, result.title, result.version);
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::PublishError;
pub use executor::Publisher;
pub use result::{DryRunResult, PublishResult};

/// Settings shared by every document of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    /// Target space key.
    pub space_key: String,
    /// Parent page ID for documents without a directory-derived parent.
    pub default_parent_id: Option<String>,
}
