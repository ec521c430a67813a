//! Markdown to Confluence storage format conversion for wikipub.
//!
//! A document goes through four stages:
//! - [`parse_markdown`] builds a [`Node`] tree (`CommonMark` plus tables,
//!   strikethrough, task lists and `$`/`$$` math)
//! - [`Transformer`] renders mermaid diagrams to PNG and math to SVG through
//!   remote services, stores them in the [`AssetCache`] and replaces them,
//!   like ordinary images, with normalized image nodes
//! - [`to_html`] serializes the tree with self-closed void elements
//! - [`to_storage_format`] rewrites every `<img src="X" />` into an
//!   `<ac:image>` macro referencing the attachment `X`
//!
//! [`DocumentConverter`] chains the stages and returns the body together
//! with the [`Asset`]s that must be uploaded as attachments.

mod asset;
mod cache;
mod converter;
mod diagram;
mod document;
mod html;
mod http;
mod math;
mod parser;
mod storage;
mod transform;
mod tree;

pub use asset::{Asset, AssetKind, is_absolute_url};
pub use cache::AssetCache;
pub use converter::{ConvertedDocument, DocumentConverter};
pub use diagram::{DiagramError, DiagramLanguage, DiagramRenderer, MermaidInkRenderer};
pub use document::{Document, sort_for_publishing};
pub use html::{escape_html, to_html};
pub use http::{DEFAULT_TIMEOUT, create_agent};
pub use math::{HttpMathRenderer, MathError, MathRenderer};
pub use parser::{parse_markdown, parser_options};
pub use storage::to_storage_format;
pub use transform::{TransformError, Transformer};
pub use tree::{Alignment, Node, NodeKind};
