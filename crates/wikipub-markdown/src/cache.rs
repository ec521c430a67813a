//! Local cache directory for rendered assets.
//!
//! Rendered diagrams and formulas are written here during transformation
//! and read back by the attachment uploader in the same run.
//!
//! Directory layout mirrors the markdown tree so that documents with the
//! same file name in different folders never collide:
//! ```text
//! {root}/
//! +-- setup-0.png          # from setup.md
//! +-- guides/
//!     +-- setup-0.png      # from guides/setup.md
//!     +-- setup-1.svg
//! ```

use std::path::{Path, PathBuf};

use crate::document::Document;

/// Asset cache rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
}

impl AssetCache {
    /// Create a cache rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the cache.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of `filename` for `document`.
    #[must_use]
    pub fn path_for(&self, document: &Document, filename: &str) -> PathBuf {
        let dir = document.relative_dir();
        if dir.is_empty() {
            self.root.join(filename)
        } else {
            self.root.join(dir).join(filename)
        }
    }

    /// Write `data` for `document` under `filename`, replacing any previous file.
    ///
    /// Returns the path written.
    pub fn write(
        &self,
        document: &Document,
        filename: &str,
        data: &[u8],
    ) -> std::io::Result<PathBuf> {
        let path = self.path_for(document, filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, data)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Cached asset");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_nested_document() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AssetCache::new(dir.path().join("cache"));
        let doc = Document::new("guides/setup.md", "/docs/guides/setup.md", "");

        let path = cache.write(&doc, "setup-0.png", b"png").unwrap();

        assert_eq!(path, dir.path().join("cache/guides/setup-0.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"png");
    }

    #[test]
    fn test_write_top_level_document() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AssetCache::new(dir.path());
        let doc = Document::new("readme.md", "/docs/readme.md", "");

        let path = cache.write(&doc, "readme-0.svg", b"<svg/>").unwrap();

        assert_eq!(path, dir.path().join("readme-0.svg"));
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AssetCache::new(dir.path());
        let doc = Document::new("a.md", "/docs/a.md", "");

        cache.write(&doc, "a-0.png", b"old").unwrap();
        let path = cache.write(&doc, "a-0.png", b"new").unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }
}
