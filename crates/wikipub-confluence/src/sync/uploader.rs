//! Attachment upload for a synchronized page.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};
use wikipub_markdown::Asset;

use super::error::UploadError;
use crate::api::WikiApi;
use crate::types::AttachmentFile;

/// Version comment stored with every uploaded attachment.
pub const ATTACHMENT_COMMENT: &str = "Uploaded by wikipub";

/// MIME type for an attachment extension.
#[must_use]
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Uploads a document's assets as attachments of its page.
pub struct AttachmentUploader<'a> {
    api: &'a dyn WikiApi,
}

impl<'a> AttachmentUploader<'a> {
    #[must_use]
    pub fn new(api: &'a dyn WikiApi) -> Self {
        Self { api }
    }

    /// Upload `assets` to the page in a single minor-edit batch.
    ///
    /// Returns the number of files submitted. Nothing is sent when there is
    /// nothing to upload.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Io`] if an asset cannot be read, or
    /// [`UploadError::Api`] if the upload fails.
    pub fn upload(
        &self,
        page_id: &str,
        version: u32,
        assets: &[Asset],
    ) -> Result<usize, UploadError> {
        let files = Self::collect_files(assets)?;
        if files.is_empty() {
            debug!("No attachments for page {}", page_id);
            return Ok(0);
        }

        self.api
            .upload_attachments(page_id, version, &files, true)
            .map_err(|source| UploadError::Api {
                page_id: page_id.to_owned(),
                source,
            })?;

        Ok(files.len())
    }

    /// Read the bytes of every uploadable asset.
    ///
    /// Assets without a local file (absolute URLs) are skipped, and an image
    /// referenced more than once is sent once. Images from different folders
    /// sharing a basename collide; the first one wins.
    fn collect_files(assets: &[Asset]) -> Result<Vec<AttachmentFile>, UploadError> {
        let mut seen: HashMap<&str, &std::path::Path> = HashMap::new();
        let mut files = Vec::with_capacity(assets.len());

        for asset in assets {
            let Some(path) = &asset.path else {
                warn!("Skipping remote image {}", asset.filename);
                continue;
            };
            match seen.entry(asset.filename.as_str()) {
                Entry::Occupied(first) => {
                    if *first.get() != path.as_path() {
                        warn!(
                            "Attachment {} already taken by {}, skipping {}",
                            asset.filename,
                            first.get().display(),
                            path.display()
                        );
                    }
                    continue;
                }
                Entry::Vacant(slot) => {
                    slot.insert(path.as_path());
                }
            }

            let data = std::fs::read(path).map_err(|source| UploadError::Io {
                path: path.clone(),
                source,
            })?;
            files.push(AttachmentFile {
                filename: asset.filename.clone(),
                content_type: content_type_for(asset.extension().as_deref()),
                data,
                comment: ATTACHMENT_COMMENT.to_owned(),
            });
        }

        Ok(files)
    }
}
