//! Error types for synchronization and upload.

use std::path::PathBuf;

use crate::error::ConfluenceError;

/// Error while creating or updating a page.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The parent page derived from the document path does not exist.
    #[error("parent page '{title}' not found in space {space_key}")]
    MissingParent {
        /// Parent title looked up.
        title: String,
        /// Space searched.
        space_key: String,
    },

    /// Confluence API error (includes version conflicts).
    #[error("Confluence API error: {0}")]
    Api(#[from] ConfluenceError),
}

/// Error while uploading attachments.
///
/// The page body has already been written when this occurs; publishing the
/// document again uploads the attachments.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Asset could not be read from the local cache or source tree.
    #[error("failed to read asset {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Upload request failed.
    #[error("failed to upload attachments to page {page_id} (page body already updated): {source}")]
    Api {
        page_id: String,
        #[source]
        source: ConfluenceError,
    },
}
