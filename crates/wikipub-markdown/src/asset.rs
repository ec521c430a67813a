//! Assets collected while transforming a document.

use std::path::{Path, PathBuf};

/// Kind of asset, which determines its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Diagram rendered to PNG by the diagram service.
    Diagram,
    /// Math expression rendered to SVG.
    Math,
    /// Image referenced from the markdown source.
    Image,
}

impl AssetKind {
    /// Extension of generated files; `None` for referenced images, which keep their own.
    #[must_use]
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Diagram => Some("png"),
            Self::Math => Some("svg"),
            Self::Image => None,
        }
    }
}

/// An image associated with a document and uploaded as a page attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Attachment filename, identical to the `src` of the rendered image.
    pub filename: String,
    /// How the asset came to be.
    pub kind: AssetKind,
    /// Local file holding the bytes. `None` for absolute URLs, which are
    /// referenced in place and never uploaded.
    pub path: Option<PathBuf>,
}

impl Asset {
    /// Asset rendered into the cache.
    #[must_use]
    pub fn generated(filename: String, kind: AssetKind, path: PathBuf) -> Self {
        Self {
            filename,
            kind,
            path: Some(path),
        }
    }

    /// Asset for an image reference; relative URLs resolve against `source_dir`.
    ///
    /// Local images are attached under their basename, so `../img/a.png`
    /// becomes the attachment `a.png`. Absolute URLs keep the full URL.
    #[must_use]
    pub fn referenced(url: &str, source_dir: &Path) -> Self {
        if is_absolute_url(url) {
            return Self {
                filename: url.to_owned(),
                kind: AssetKind::Image,
                path: None,
            };
        }
        let basename = url.rsplit(['/', '\\']).next().unwrap_or(url);
        Self {
            filename: basename.to_owned(),
            kind: AssetKind::Image,
            path: Some(source_dir.join(url)),
        }
    }

    /// File extension of the attachment, lowercased.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        if let Some(ext) = self.kind.extension() {
            return Some(ext.to_owned());
        }
        let name = self.filename.split(['?', '#']).next().unwrap_or_default();
        let (_, ext) = name.rsplit_once('.')?;
        (!ext.contains('/')).then(|| ext.to_ascii_lowercase())
    }
}

/// Whether `url` carries a scheme (`https://`, `data:`, ...) rather than a local path.
#[must_use]
pub fn is_absolute_url(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    // Single letters are Windows drive prefixes, not schemes.
    scheme.len() > 1
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
