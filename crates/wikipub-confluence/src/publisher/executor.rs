//! Publisher implementation.

use tracing::info;
use wikipub_markdown::{Document, DocumentConverter};

use super::PublishConfig;
use super::error::PublishError;
use super::result::{DryRunResult, PublishResult};
use crate::api::WikiApi;
use crate::sync::{AttachmentUploader, Synchronizer};

/// Publishes markdown documents as Confluence pages.
pub struct Publisher<'a> {
    api: &'a dyn WikiApi,
    converter: DocumentConverter<'a>,
    config: PublishConfig,
}

impl<'a> Publisher<'a> {
    /// Create a new publisher.
    #[must_use]
    pub fn new(
        api: &'a dyn WikiApi,
        converter: DocumentConverter<'a>,
        config: PublishConfig,
    ) -> Self {
        Self {
            api,
            converter,
            config,
        }
    }

    /// Publish one document.
    ///
    /// The page body is written before the attachments. If the upload fails
    /// the page keeps its new body; publishing again repairs the attachments
    /// because conversion is deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - diagram or math rendering fails (nothing is written)
    /// - the parent page is missing or a page call fails
    /// - reading or uploading an attachment fails
    pub fn publish(&self, document: &Document) -> Result<PublishResult, PublishError> {
        let converted = self.converter.convert(document)?;
        let title = document.title();

        let synchronizer = Synchronizer::new(self.api, &self.config.space_key);
        let page = synchronizer.sync(
            title,
            &converted.body,
            document.parent_title(),
            self.config.default_parent_id.as_deref(),
        )?;

        let uploader = AttachmentUploader::new(self.api);
        let attachments_uploaded = uploader.upload(&page.id, page.version, &converted.assets)?;

        info!(
            document = document.relative_path(),
            page_id = page.id,
            version = page.version,
            attachments = attachments_uploaded,
            "Published document"
        );

        Ok(PublishResult {
            title: page.title,
            page_id: page.id,
            version: page.version,
            action: page.action,
            attachments_uploaded,
        })
    }

    /// Convert a document without calling Confluence.
    ///
    /// Diagrams and math are still rendered into the asset cache.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Transform`] if rendering fails.
    pub fn dry_run(&self, document: &Document) -> Result<DryRunResult, PublishError> {
        let converted = self.converter.convert(document)?;

        Ok(DryRunResult {
            title: document.title().to_owned(),
            parent_title: document.parent_title().map(str::to_owned),
            body: converted.body,
            assets: converted.assets,
        })
    }
}
