//! Markdown documents discovered under a base folder.

use std::path::{Path, PathBuf};

/// Filename that collapses to its directory name when deriving titles.
const INDEX_FILENAME: &str = "index.md";

/// A markdown document identified by its path relative to the base folder.
#[derive(Debug, Clone)]
pub struct Document {
    relative_path: String,
    source_path: PathBuf,
    content: String,
}

impl Document {
    /// Create a document from already loaded content.
    ///
    /// `relative_path` is normalized to `/` separators.
    #[must_use]
    pub fn new(
        relative_path: impl AsRef<str>,
        source_path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            relative_path: relative_path.as_ref().replace('\\', "/"),
            source_path: source_path.into(),
            content: content.into(),
        }
    }

    /// Read `relative_path` from `base_folder`.
    pub fn load(base_folder: &Path, relative_path: &str) -> std::io::Result<Self> {
        let source_path = base_folder.join(relative_path);
        let content = std::fs::read_to_string(&source_path)?;
        Ok(Self::new(relative_path, source_path, content))
    }

    /// Path relative to the base folder, `/`-separated.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Absolute (or base-folder-joined) path of the markdown file.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Raw markdown text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Directory containing the markdown file; relative image URLs resolve against it.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        self.source_path.parent().unwrap_or(Path::new("."))
    }

    /// Directory part of the relative path (empty for top-level documents).
    #[must_use]
    pub fn relative_dir(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map_or("", |(dir, _)| dir)
    }

    /// Page title derived from the path.
    ///
    /// `guides/index.md` becomes `guides`, `guides/setup.md` becomes `setup`.
    /// A top-level `index.md` keeps the title `index`.
    #[must_use]
    pub fn title(&self) -> &str {
        let segments = self.title_segments();
        let last = segments.last().copied().unwrap_or_default();
        last.strip_suffix(".md").unwrap_or(last)
    }

    /// Title of the parent page: the directory segment above the title, if any.
    #[must_use]
    pub fn parent_title(&self) -> Option<&str> {
        let segments = self.title_segments();
        segments
            .len()
            .checked_sub(2)
            .map(|i| segments[i])
            .filter(|s| !s.is_empty())
    }

    /// Attachment filename for the asset at `index`: `<file stem>-<index>.<extension>`.
    #[must_use]
    pub fn asset_filename(&self, index: usize, extension: &str) -> String {
        format!("{}-{index}.{extension}", self.file_stem())
    }

    fn file_stem(&self) -> &str {
        let filename = self
            .relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path);
        filename
            .rsplit_once('.')
            .map_or(filename, |(stem, _)| stem)
    }

    fn title_segments(&self) -> Vec<&str> {
        title_segments(&self.relative_path)
    }
}

/// Sort `/`-separated relative paths so parent pages come before their children.
///
/// Paths are ordered by title depth, then alphabetically: `guides/index.md`
/// (title `guides`) precedes `guides/advanced/index.md` and `guides/api.md`,
/// whose parent it creates.
pub fn sort_for_publishing<S: AsRef<str>>(paths: &mut [S]) {
    paths.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        title_segments(a)
            .len()
            .cmp(&title_segments(b).len())
            .then_with(|| a.cmp(b))
    });
}

/// Path segments with a trailing `index.md` folded into its directory.
fn title_segments(relative_path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = relative_path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    if segments.len() > 1 && segments.last() == Some(&INDEX_FILENAME) {
        segments.pop();
    }
    segments
}
