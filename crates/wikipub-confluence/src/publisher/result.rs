//! Result types for publish operations.

use wikipub_markdown::Asset;

use crate::sync::SyncAction;

/// Result of publishing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    /// Page title.
    pub title: String,
    /// Page ID (new or existing).
    pub page_id: String,
    /// Version written.
    pub version: u32,
    /// Whether the page was created or updated.
    pub action: SyncAction,
    /// Number of attachments uploaded.
    pub attachments_uploaded: usize,
}

/// Result of a dry-run (no changes made in Confluence).
#[derive(Debug, Clone)]
pub struct DryRunResult {
    /// Derived page title.
    pub title: String,
    /// Derived parent title, if the document is nested.
    pub parent_title: Option<String>,
    /// Converted body in storage format.
    pub body: String,
    /// Assets that would be uploaded.
    pub assets: Vec<Asset>,
}
