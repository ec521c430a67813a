//! CLI error types.

use std::path::PathBuf;

use wikipub_config::ConfigError;
use wikipub_confluence::PublishError;

use crate::discovery::DiscoveryError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Discovery(#[from] DiscoveryError),

    #[error("failed to read {}: {source}", path.display())]
    ReadDocument {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{document}: {source}")]
    Publish {
        document: String,
        source: PublishError,
    },
}
