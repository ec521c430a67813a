//! Error types for publish operations.

use wikipub_markdown::TransformError;

use crate::sync::{SyncError, UploadError};

/// Error while publishing a document.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Diagram or math rendering failed; nothing was written to Confluence.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Page lookup, create or update failed.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Attachment upload failed after the page was written.
    #[error(transparent)]
    Upload(#[from] UploadError),
}
