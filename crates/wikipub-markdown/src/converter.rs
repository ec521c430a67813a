//! Markdown to Confluence storage format conversion.

use crate::asset::Asset;
use crate::cache::AssetCache;
use crate::diagram::DiagramRenderer;
use crate::document::Document;
use crate::html::to_html;
use crate::math::MathRenderer;
use crate::parser::parse_markdown;
use crate::storage::to_storage_format;
use crate::transform::{TransformError, Transformer};

/// Result of converting a document.
#[derive(Clone, Debug)]
pub struct ConvertedDocument {
    /// Page body in Confluence storage format.
    pub body: String,
    /// Images referenced by the body, in discovery order.
    pub assets: Vec<Asset>,
}

/// Converts documents: parse, transform, render markup, rewrite images.
pub struct DocumentConverter<'a> {
    transformer: Transformer<'a>,
}

impl<'a> DocumentConverter<'a> {
    #[must_use]
    pub fn new(
        diagrams: &'a dyn DiagramRenderer,
        math: &'a dyn MathRenderer,
        cache: &'a AssetCache,
    ) -> Self {
        Self {
            transformer: Transformer::new(diagrams, math, cache),
        }
    }

    /// Convert `document` into a storage format body and its assets.
    pub fn convert(&self, document: &Document) -> Result<ConvertedDocument, TransformError> {
        let tree = parse_markdown(document.content());
        let mut assets = Vec::new();
        let tree = self.transformer.transform(document, tree, &mut assets)?;
        let body = to_storage_format(&to_html(&tree));

        tracing::debug!(
            document = document.relative_path(),
            assets = assets.len(),
            "Converted document"
        );

        Ok(ConvertedDocument { body, assets })
    }
}
