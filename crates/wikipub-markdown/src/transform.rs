//! Depth-first rewrite of image, diagram and math nodes into image references.
//!
//! Children are rewritten in source order before their parent, sequentially.
//! Asset filenames embed the number of assets discovered so far, so the
//! traversal order fixes the filenames: identical input always produces
//! identical names.

use std::path::PathBuf;

use crate::asset::{Asset, AssetKind};
use crate::cache::AssetCache;
use crate::diagram::{DiagramError, DiagramLanguage, DiagramRenderer};
use crate::document::Document;
use crate::math::{MathError, MathRenderer};
use crate::tree::{Node, NodeKind};

/// Error raised while transforming a document. Aborts the document.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("failed to render diagram in {document}")]
    Diagram {
        document: String,
        #[source]
        source: DiagramError,
    },
    #[error("failed to render math in {document}")]
    Math {
        document: String,
        #[source]
        source: MathError,
    },
    #[error("failed to write asset {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rewrites a document tree, rendering diagrams and math into the asset cache.
pub struct Transformer<'a> {
    diagrams: &'a dyn DiagramRenderer,
    math: &'a dyn MathRenderer,
    cache: &'a AssetCache,
}

impl<'a> Transformer<'a> {
    #[must_use]
    pub fn new(
        diagrams: &'a dyn DiagramRenderer,
        math: &'a dyn MathRenderer,
        cache: &'a AssetCache,
    ) -> Self {
        Self {
            diagrams,
            math,
            cache,
        }
    }

    /// Rewrite `root`, appending discovered assets to `assets` in discovery order.
    pub fn transform(
        &self,
        document: &Document,
        root: Node,
        assets: &mut Vec<Asset>,
    ) -> Result<Node, TransformError> {
        let Node { kind, children } = root;

        let children = children
            .into_iter()
            .map(|child| self.transform(document, child, assets))
            .collect::<Result<Vec<_>, _>>()?;

        if let NodeKind::Code {
            lang: Some(lang),
            value,
        } = &kind
            && let Some(language) = DiagramLanguage::parse(lang)
        {
            return self.render_diagram(document, language, value, assets);
        }

        match kind {
            NodeKind::Image { url, .. } => {
                let asset = Asset::referenced(&url, document.source_dir());
                let node = Node::image(asset.filename.clone());
                assets.push(asset);
                Ok(node)
            }
            NodeKind::Math { value } => self.render_math(document, &value, true, assets),
            NodeKind::InlineMath { value } => self.render_math(document, &value, false, assets),
            kind => Ok(Node::with_children(kind, children)),
        }
    }

    fn render_diagram(
        &self,
        document: &Document,
        language: DiagramLanguage,
        source: &str,
        assets: &mut Vec<Asset>,
    ) -> Result<Node, TransformError> {
        let data = self
            .diagrams
            .render(language, source)
            .map_err(|source| TransformError::Diagram {
                document: document.relative_path().to_owned(),
                source,
            })?;
        self.store(document, AssetKind::Diagram, &data, assets)
    }

    fn render_math(
        &self,
        document: &Document,
        latex: &str,
        display: bool,
        assets: &mut Vec<Asset>,
    ) -> Result<Node, TransformError> {
        let svg = self
            .math
            .render(latex, display)
            .map_err(|source| TransformError::Math {
                document: document.relative_path().to_owned(),
                source,
            })?;
        self.store(document, AssetKind::Math, svg.as_bytes(), assets)
    }

    /// Persist a generated asset and return the image node that references it.
    fn store(
        &self,
        document: &Document,
        kind: AssetKind,
        data: &[u8],
        assets: &mut Vec<Asset>,
    ) -> Result<Node, TransformError> {
        let extension = kind.extension().unwrap_or("bin");
        let filename = document.asset_filename(assets.len(), extension);
        let path = self
            .cache
            .write(document, &filename, data)
            .map_err(|source| TransformError::Io {
                path: self.cache.path_for(document, &filename),
                source,
            })?;

        tracing::info!(document = document.relative_path(), %filename, "Rendered asset");
        assets.push(Asset::generated(filename.clone(), kind, path));
        Ok(Node::image(filename))
    }
}
