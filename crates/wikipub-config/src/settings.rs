//! Optional per-folder publishing settings (`settings.json`).

use std::path::Path;

use serde::Deserialize;

/// Settings filename looked up in the base folder.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Local publishing settings.
///
/// Absence of the file (or a file that cannot be parsed) is not an error:
/// [`Settings::load`] falls back to the empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Page used as ancestor for documents without a directory-derived parent.
    pub parent_id: Option<String>,
}

impl Settings {
    /// Load `settings.json` from `base_folder`.
    pub fn load(base_folder: &Path) -> Self {
        let path = base_folder.join(SETTINGS_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::info!(path = %path.display(), error = %e, "No settings file found");
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed settings file");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_parent_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILENAME), r#"{"parent_id": "12345"}"#).unwrap();

        let settings = Settings::load(dir.path());

        assert_eq!(settings.parent_id.as_deref(), Some("12345"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILENAME), "{ not json").unwrap();

        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{"space": "DOCS", "parent_id": "7"}"#,
        )
        .unwrap();

        assert_eq!(Settings::load(dir.path()).parent_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILENAME), "{}").unwrap();

        assert!(Settings::load(dir.path()).parent_id.is_none());
    }
}
