//! The subset of the Confluence API used for publishing.

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Attachment, AttachmentFile, Page, PageContent, PageSummary};

/// Remote wiki operations used by the synchronizer and uploader.
///
/// Implemented by [`ConfluenceClient`]; tests substitute an in-memory wiki.
pub trait WikiApi {
    /// Pages titled exactly `title` in `space_key`.
    fn find_pages(&self, space_key: &str, title: &str)
    -> Result<Vec<PageSummary>, ConfluenceError>;

    /// Create a page carrying `version`.
    fn create_page(&self, content: &PageContent<'_>, version: u32) -> Result<Page, ConfluenceError>;

    /// Fetch a page with its current version.
    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError>;

    /// Replace title, body and ancestors, submitting `version` as the new version.
    fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        version: u32,
    ) -> Result<Page, ConfluenceError>;

    /// Create or update `files` on a page in one batch.
    fn upload_attachments(
        &self,
        page_id: &str,
        version: u32,
        files: &[AttachmentFile],
        minor_edit: bool,
    ) -> Result<Vec<Attachment>, ConfluenceError>;
}

impl WikiApi for ConfluenceClient {
    fn find_pages(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError> {
        ConfluenceClient::find_pages(self, space_key, title)
    }

    fn create_page(&self, content: &PageContent<'_>, version: u32) -> Result<Page, ConfluenceError> {
        ConfluenceClient::create_page(self, content, version)
    }

    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        ConfluenceClient::get_page(self, page_id)
    }

    fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        ConfluenceClient::update_page(self, page_id, content, version)
    }

    fn upload_attachments(
        &self,
        page_id: &str,
        version: u32,
        files: &[AttachmentFile],
        minor_edit: bool,
    ) -> Result<Vec<Attachment>, ConfluenceError> {
        ConfluenceClient::upload_attachments(self, page_id, version, files, minor_edit)
    }
}
