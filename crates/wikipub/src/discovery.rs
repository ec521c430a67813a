//! Markdown file discovery under the base folder.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use wikipub_markdown::sort_for_publishing;

/// Error while listing markdown files.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DiscoveryError {
    #[error("base folder not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("base folder path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to list markdown files: {0}")]
    Walk(#[from] glob::GlobError),
}

/// Relative paths (`/`-separated) of all `*.md` files under `base_folder`.
///
/// Paths come in publishing order, parents before children. Hidden files
/// and directories are skipped.
pub(crate) fn discover_documents(base_folder: &Path) -> Result<Vec<String>, DiscoveryError> {
    if !base_folder.is_dir() {
        return Err(DiscoveryError::NotFound(base_folder.to_path_buf()));
    }
    let base = base_folder
        .to_str()
        .ok_or_else(|| DiscoveryError::InvalidPath(base_folder.to_path_buf()))?;

    let pattern = format!("{}/**/*.md", Pattern::escape(base));
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut documents = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        if let Some(relative) = relative_path(base_folder, &path) {
            documents.push(relative);
        }
    }

    sort_for_publishing(&mut documents);
    tracing::debug!(
        count = documents.len(),
        base_folder = %base_folder.display(),
        "Discovered markdown files"
    );
    Ok(documents)
}

fn relative_path(base_folder: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base_folder).ok()?;
    let segments: Option<Vec<&str>> = relative.iter().map(|s| s.to_str()).collect();
    Some(segments?.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_discover_in_publishing_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("guides/advanced")).unwrap();
        fs::write(dir.path().join("index.md"), "# Home").unwrap();
        fs::write(dir.path().join("guides/setup.md"), "").unwrap();
        fs::write(dir.path().join("guides/index.md"), "").unwrap();
        fs::write(dir.path().join("guides/advanced/tuning.md"), "").unwrap();
        fs::write(dir.path().join("guides/notes.txt"), "").unwrap();

        let documents = discover_documents(dir.path()).unwrap();

        assert_eq!(
            documents,
            vec![
                "guides/index.md",
                "index.md",
                "guides/setup.md",
                "guides/advanced/tuning.md",
            ]
        );
    }

    #[test]
    fn test_index_precedes_its_children() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("guides/advanced")).unwrap();
        fs::write(dir.path().join("guides/index.md"), "").unwrap();
        fs::write(dir.path().join("guides/api.md"), "").unwrap();
        fs::write(dir.path().join("guides/advanced/index.md"), "").unwrap();

        assert_eq!(
            discover_documents(dir.path()).unwrap(),
            vec!["guides/index.md", "guides/advanced/index.md", "guides/api.md"]
        );
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join(".cache/old.md"), "").unwrap();
        fs::write(dir.path().join(".draft.md"), "").unwrap();
        fs::write(dir.path().join("page.md"), "").unwrap();

        assert_eq!(discover_documents(dir.path()).unwrap(), vec!["page.md"]);
    }

    #[test]
    fn test_empty_folder() {
        let dir = tempfile::tempdir().unwrap();

        assert!(discover_documents(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = discover_documents(&missing).unwrap_err();

        assert!(matches!(err, DiscoveryError::NotFound(path) if path == missing));
    }
}
