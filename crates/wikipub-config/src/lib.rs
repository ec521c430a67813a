//! Configuration management for wikipub.
//!
//! Parses `wikipub.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//! The optional per-folder `settings.json` is handled by [`Settings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `confluence.base_url`
//! - `confluence.username`
//! - `confluence.api_token`
//! - `confluence.space_key`
//! - `diagrams.mermaid_url`
//! - `math.renderer_url`

mod expand;
mod settings;

pub use settings::{SETTINGS_FILENAME, Settings};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown base folder.
    pub base_folder: Option<PathBuf>,
    /// Override asset cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Override Confluence base URL.
    pub base_url: Option<String>,
    /// Override Confluence username.
    pub username: Option<String>,
    /// Override Confluence API token.
    pub api_token: Option<String>,
    /// Override Confluence space key.
    pub space_key: Option<String>,
    /// Override mermaid rendering service URL.
    pub mermaid_url: Option<String>,
    /// Override math rendering service URL.
    pub math_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wikipub.toml";

/// Default mermaid rendering service.
pub const DEFAULT_MERMAID_URL: &str = "https://mermaid.ink/img";

/// Default LaTeX to SVG rendering service.
pub const DEFAULT_MATH_URL: &str = "https://latex.codecogs.com/svg.image";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Diagram rendering configuration.
    pub diagrams: DiagramsConfig,
    /// Math rendering configuration.
    pub math: MathConfig,
    /// HTTP client configuration.
    pub http: HttpConfig,
    /// Confluence configuration.
    confluence: Option<ConfluenceConfigRaw>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Confluence configuration with CLI overrides applied (set after loading).
    #[serde(skip)]
    pub confluence_resolved: ConfluenceConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    base_folder: Option<String>,
    cache_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Folder containing the markdown tree and the optional `settings.json`.
    pub base_folder: PathBuf,
    /// Directory holding rendered assets between transformation and upload.
    pub cache_dir: PathBuf,
}

/// Diagram rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiagramsConfig {
    /// Base URL of the mermaid rendering service.
    pub mermaid_url: String,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            mermaid_url: DEFAULT_MERMAID_URL.to_owned(),
        }
    }
}

/// Math rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MathConfig {
    /// Base URL of the LaTeX to SVG rendering service.
    pub renderer_url: String,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            renderer_url: DEFAULT_MATH_URL.to_owned(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global timeout for a single request, in seconds.
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Raw Confluence configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfluenceConfigRaw {
    base_url: Option<String>,
    username: Option<String>,
    api_token: Option<String>,
    space_key: Option<String>,
}

/// Confluence configuration.
///
/// Fields may be empty until [`Config::require_confluence`] validates them.
#[derive(Debug, Default, Clone)]
pub struct ConfluenceConfig {
    /// Confluence base URL (e.g. `https://example.atlassian.net/wiki`).
    pub base_url: String,
    /// Account used for basic authentication.
    pub username: String,
    /// API token used for basic authentication.
    pub api_token: String,
    /// Key of the space pages are published into.
    pub space_key: String,
}

impl ConfluenceConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        require_non_empty(&self.username, "confluence.username")?;
        require_non_empty(&self.api_token, "confluence.api_token")?;
        require_non_empty(&self.space_key, "confluence.space_key")?;
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.api_token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wikipub.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_folder) = &settings.base_folder {
            self.docs_resolved.base_folder.clone_from(base_folder);
        }
        if let Some(cache_dir) = &settings.cache_dir {
            self.docs_resolved.cache_dir.clone_from(cache_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.confluence_resolved.base_url.clone_from(base_url);
        }
        if let Some(username) = &settings.username {
            self.confluence_resolved.username.clone_from(username);
        }
        if let Some(api_token) = &settings.api_token {
            self.confluence_resolved.api_token.clone_from(api_token);
        }
        if let Some(space_key) = &settings.space_key {
            self.confluence_resolved.space_key.clone_from(space_key);
        }
        if let Some(mermaid_url) = &settings.mermaid_url {
            self.diagrams.mermaid_url.clone_from(mermaid_url);
        }
        if let Some(math_url) = &settings.math_url {
            self.math.renderer_url.clone_from(math_url);
        }
    }

    /// Get validated Confluence configuration.
    ///
    /// Use this instead of accessing `confluence_resolved` directly when the
    /// command talks to Confluence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        self.confluence_resolved.validate()?;
        Ok(&self.confluence_resolved)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            diagrams: DiagramsConfig::default(),
            math: MathConfig::default(),
            http: HttpConfig::default(),
            confluence: None,
            docs_resolved: DocsConfig {
                base_folder: base.join("docs"),
                cache_dir: base.join(".wikipub").join("cache"),
            },
            confluence_resolved: ConfluenceConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Confluence fields are validated separately by [`Self::require_confluence`]
    /// because they may still be supplied from the command line.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_http_url(&self.diagrams.mermaid_url, "diagrams.mermaid_url")?;
        require_http_url(&self.math.renderer_url, "math.renderer_url")?;
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.diagrams.mermaid_url =
            expand::expand_env(&self.diagrams.mermaid_url, "diagrams.mermaid_url")?;
        self.math.renderer_url = expand::expand_env(&self.math.renderer_url, "math.renderer_url")?;

        if let Some(ref mut confluence) = self.confluence {
            let fields = [
                (&mut confluence.base_url, "confluence.base_url"),
                (&mut confluence.username, "confluence.username"),
                (&mut confluence.api_token, "confluence.api_token"),
                (&mut confluence.space_key, "confluence.space_key"),
            ];
            for (value, field) in fields {
                if let Some(raw) = value.as_deref() {
                    *value = Some(expand::expand_env(raw, field)?);
                }
            }
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and flatten the
    /// raw Confluence section.
    fn resolve(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            base_folder: resolve(self.docs.base_folder.as_deref(), "docs"),
            cache_dir: resolve(self.docs.cache_dir.as_deref(), ".wikipub/cache"),
        };

        self.confluence_resolved = self
            .confluence
            .as_ref()
            .map(|raw| ConfluenceConfig {
                base_url: raw.base_url.clone().unwrap_or_default(),
                username: raw.username.clone().unwrap_or_default(),
                api_token: raw.api_token.clone().unwrap_or_default(),
                space_key: raw.space_key.clone().unwrap_or_default(),
            })
            .unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.base_folder, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.cache_dir,
            PathBuf::from("/test/.wikipub/cache")
        );
        assert_eq!(config.diagrams.mermaid_url, DEFAULT_MERMAID_URL);
        assert_eq!(config.math.renderer_url, DEFAULT_MATH_URL);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert!(config.confluence_resolved.base_url.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.diagrams.mermaid_url, DEFAULT_MERMAID_URL);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_load_resolves_paths_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[docs]
base_folder = "content"
cache_dir = "tmp/assets"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.base_folder, dir.path().join("content"));
        assert_eq!(config.docs_resolved.cache_dir, dir.path().join("tmp/assets"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_confluence_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[confluence]
base_url = "https://example.atlassian.net/wiki"
username = "bot@example.com"
api_token = "secret"
space_key = "DOCS"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        let confluence = config.require_confluence().unwrap();

        assert_eq!(confluence.base_url, "https://example.atlassian.net/wiki");
        assert_eq!(confluence.username, "bot@example.com");
        assert_eq!(confluence.api_token, "secret");
        assert_eq!(confluence.space_key, "DOCS");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/wikipub.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WIKIPUB_CONFIG_TEST_TOKEN", "from-env");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[confluence]
api_token = "${WIKIPUB_CONFIG_TEST_TOKEN}"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.confluence_resolved.api_token, "from-env");
        unsafe {
            std::env::remove_var("WIKIPUB_CONFIG_TEST_TOKEN");
        }
    }

    #[test]
    fn test_load_unset_env_var_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[confluence]
api_token = "${WIKIPUB_CONFIG_TEST_UNSET}"
"#,
        );

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::EnvVar { .. })));
    }

    #[test]
    fn test_invalid_mermaid_url_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[diagrams]
mermaid_url = "mermaid.ink/img"
"#,
        );

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(err.to_string().contains("diagrams.mermaid_url"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[http]\ntimeout_secs = 0\n");

        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_cli_settings_overrides() {
        let mut config = Config::default_with_base(Path::new("/test"));

        let overrides = CliSettings {
            base_folder: Some(PathBuf::from("/custom/docs")),
            base_url: Some("https://wiki.example.com".to_owned()),
            space_key: Some("ENG".to_owned()),
            mermaid_url: Some("https://mermaid.example.com/img".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.base_folder,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(
            config.docs_resolved.cache_dir,
            PathBuf::from("/test/.wikipub/cache")
        );
        assert_eq!(config.confluence_resolved.base_url, "https://wiki.example.com");
        assert_eq!(config.confluence_resolved.space_key, "ENG");
        assert_eq!(config.diagrams.mermaid_url, "https://mermaid.example.com/img");
        assert_eq!(config.math.renderer_url, DEFAULT_MATH_URL);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.base_folder, PathBuf::from("/test/docs"));
        assert!(config.confluence_resolved.username.is_empty());
    }

    #[test]
    fn test_require_confluence_missing_fields() {
        let config = Config::default_with_base(Path::new("/test"));

        let err = config.require_confluence().unwrap_err();

        assert!(err.to_string().contains("confluence.base_url"));
    }

    #[test]
    fn test_require_confluence_rejects_non_http_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            base_url: Some("ftp://wiki".to_owned()),
            username: Some("user".to_owned()),
            api_token: Some("token".to_owned()),
            space_key: Some("DOCS".to_owned()),
            ..Default::default()
        });

        let err = config.require_confluence().unwrap_err();

        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_cli_settings_complete_missing_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[confluence]
base_url = "https://example.atlassian.net/wiki"
space_key = "DOCS"
"#,
        );
        let overrides = CliSettings {
            username: Some("ci@example.com".to_owned()),
            api_token: Some("token".to_owned()),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&overrides)).unwrap();

        assert!(config.require_confluence().is_ok());
    }
}
