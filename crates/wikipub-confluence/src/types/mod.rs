//! Confluence API types.

mod attachment;
mod page;

pub use attachment::{Attachment, AttachmentFile, AttachmentsResponse};
pub use page::{Page, PageContent, PageSearchResponse, PageSummary, Version};
