//! Attachment operations for Confluence API.

use rand::RngExt;
use tracing::info;

use super::{ConfluenceClient, read_json};
use crate::error::ConfluenceError;
use crate::types::{Attachment, AttachmentFile, AttachmentsResponse};

impl ConfluenceClient {
    /// Create or update attachments on a page in one request (upsert by filename).
    ///
    /// `version` is the page version the attachments belong to; Confluence
    /// attaches to the latest version, so it is only logged.
    pub fn upload_attachments(
        &self,
        page_id: &str,
        version: u32,
        files: &[AttachmentFile],
        minor_edit: bool,
    ) -> Result<Vec<Attachment>, ConfluenceError> {
        let url = format!("{}/content/{}/child/attachment", self.api_url(), page_id);

        info!(
            "Uploading {} attachment(s) to page {} (version {})",
            files.len(),
            page_id,
            version
        );

        let boundary = format!("----WikipubFormBoundary{:016x}", rand::rng().random::<u64>());
        let body = multipart_body(&boundary, files, minor_edit);

        let response = self
            .agent
            .put(&url)
            .header("Authorization", self.auth.header())
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .header("X-Atlassian-Token", "nocheck")
            .header("Accept", "application/json")
            .send(&body[..])?;

        let response: AttachmentsResponse = read_json(response)?;
        if response.results.is_empty() && !files.is_empty() {
            return Err(ConfluenceError::UnexpectedResponse(
                "Empty attachment response".to_owned(),
            ));
        }
        Ok(response.results)
    }
}

/// Build multipart form data: a `file` and a `comment` part per file, then `minorEdit`.
fn multipart_body(boundary: &str, files: &[AttachmentFile], minor_edit: bool) -> Vec<u8> {
    let mut body = Vec::new();

    for file in files {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                file.filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
        body.extend_from_slice(&file.data);
        body.extend_from_slice(b"\r\n");

        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"comment\"\r\n\r\n");
        body.extend_from_slice(file.comment.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"minorEdit\"\r\n\r\n");
    body.extend_from_slice(minor_edit.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");

    // End boundary
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
