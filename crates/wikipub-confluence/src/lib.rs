//! Confluence integration for wikipub.
//!
//! This crate provides:
//! - [`ConfluenceClient`]: REST API client with HTTP Basic authentication
//! - [`WikiApi`]: the operations publishing needs, implemented by the client
//! - [`Synchronizer`]: title lookup, parent resolution and create-or-update
//!   with version bookkeeping
//! - [`AttachmentUploader`]: batched attachment upload for a page
//! - [`Publisher`]: the per-document workflow tying conversion, page
//!   synchronization and upload together
//!
//! # API Client
//!
//! ```ignore
//! use wikipub_confluence::{ConfluenceClient, DEFAULT_TIMEOUT};
//!
//! let client = ConfluenceClient::new(
//!     "https://example.atlassian.net/wiki",
//!     "user@example.com",
//!     "api-token",
//!     DEFAULT_TIMEOUT,
//! );
//!
//! let pages = client.find_pages("DOCS", "setup")?;
//! ```

mod auth;

// API client
mod client;
pub use client::{ConfluenceClient, DEFAULT_TIMEOUT};

mod api;
pub use api::WikiApi;

// Types
mod types;
pub use types::{
    Attachment, AttachmentFile, AttachmentsResponse, Page, PageContent, PageSearchResponse,
    PageSummary, Version,
};

// Synchronization
pub mod sync;
pub use sync::{AttachmentUploader, SyncAction, SyncError, SyncedPage, Synchronizer, UploadError};

// Publisher
pub mod publisher;
pub use publisher::{DryRunResult, PublishConfig, PublishError, PublishResult, Publisher};

// Errors
pub mod error;
pub use error::ConfluenceError;

#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockWiki, StoredPage, UploadCall};
