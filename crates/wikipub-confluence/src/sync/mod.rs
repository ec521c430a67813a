//! Page synchronization and attachment upload.
//!
//! [`Synchronizer`] decides per document whether the page is created or
//! updated and keeps the version counter; [`AttachmentUploader`] then
//! pushes the document's assets against the page it produced.

mod error;
mod synchronizer;
mod uploader;

pub use error::{SyncError, UploadError};
pub use synchronizer::{
    INITIAL_VERSION, PageState, SyncAction, SyncPlan, SyncedPage, Synchronizer,
};
pub use uploader::{ATTACHMENT_COMMENT, AttachmentUploader, content_type_for};
