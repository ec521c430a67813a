//! Confluence attachment types.

use serde::Deserialize;

/// Confluence attachment.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    pub id: String,
    /// Attachment title/filename.
    pub title: String,
}

/// Attachments API response.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsResponse {
    /// Created or updated attachments.
    pub results: Vec<Attachment>,
}

/// File submitted in an attachment upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentFile {
    /// Attachment filename, matched against existing attachments on the page.
    pub filename: String,
    /// MIME type of `data`.
    pub content_type: &'static str,
    /// File contents.
    pub data: Vec<u8>,
    /// Version comment stored with the attachment.
    pub comment: String,
}
