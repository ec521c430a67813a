//! In-memory wiki for testing.
//!
//! Provides [`MockWiki`], a [`WikiApi`] that keeps pages and attachments in
//! memory, enforces the version rule of the real service and records every
//! call in order.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::api::WikiApi;
use crate::error::ConfluenceError;
use crate::types::{Attachment, AttachmentFile, Page, PageContent, PageSummary, Version};

/// Page stored by [`MockWiki`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPage {
    pub id: String,
    pub space_key: String,
    pub title: String,
    pub body: String,
    pub parent_id: Option<String>,
    pub version: u32,
}

/// Attachment upload recorded by [`MockWiki`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub page_id: String,
    pub version: u32,
    pub files: Vec<AttachmentFile>,
    pub minor_edit: bool,
}

/// Mock wiki for testing.
///
/// # Example
///
/// ```ignore
/// use wikipub_confluence::{MockWiki, WikiApi};
///
/// let wiki = MockWiki::new().with_page("DOCS", "guides", 3);
/// let found = wiki.find_pages("DOCS", "guides").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockWiki {
    pages: RwLock<Vec<StoredPage>>,
    uploads: RwLock<Vec<UploadCall>>,
    calls: RwLock<Vec<String>>,
    failures: RwLock<HashMap<&'static str, u16>>,
}

impl MockWiki {
    /// Create an empty wiki.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level page with the given version. IDs are assigned sequentially from 100.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, space_key: &str, title: &str, version: u32) -> Self {
        self.insert(space_key, title, "", None, version);
        self
    }

    /// Make every call of `operation` (e.g. `"upload_attachments"`) fail with `status`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing(self, operation: &'static str, status: u16) -> Self {
        self.failures.write().unwrap().insert(operation, status);
        self
    }

    /// Snapshot of all pages.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn pages(&self) -> Vec<StoredPage> {
        self.pages.read().unwrap().clone()
    }

    /// Page titled `title`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn page(&self, title: &str) -> Option<StoredPage> {
        self.pages
            .read()
            .unwrap()
            .iter()
            .find(|p| p.title == title)
            .cloned()
    }

    /// Recorded attachment uploads.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn uploads(&self) -> Vec<UploadCall> {
        self.uploads.read().unwrap().clone()
    }

    /// Names of the operations called so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    fn insert(
        &self,
        space_key: &str,
        title: &str,
        body: &str,
        parent_id: Option<&str>,
        version: u32,
    ) -> StoredPage {
        let mut pages = self.pages.write().unwrap();
        let page = StoredPage {
            id: (100 + pages.len()).to_string(),
            space_key: space_key.to_owned(),
            title: title.to_owned(),
            body: body.to_owned(),
            parent_id: parent_id.map(str::to_owned),
            version,
        };
        pages.push(page.clone());
        page
    }

    fn record(&self, operation: &'static str) -> Result<(), ConfluenceError> {
        self.calls.write().unwrap().push(operation.to_owned());
        match self.failures.read().unwrap().get(operation) {
            Some(&status) => Err(ConfluenceError::HttpResponse {
                status,
                body: format!("{operation} failed"),
            }),
            None => Ok(()),
        }
    }

    fn not_found(page_id: &str) -> ConfluenceError {
        ConfluenceError::HttpResponse {
            status: 404,
            body: format!("No content found with id: {page_id}"),
        }
    }
}

impl From<&StoredPage> for Page {
    fn from(page: &StoredPage) -> Self {
        Page {
            id: page.id.clone(),
            title: page.title.clone(),
            version: Version {
                number: page.version,
            },
        }
    }
}

impl WikiApi for MockWiki {
    fn find_pages(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError> {
        self.record("find_pages")?;
        Ok(self
            .pages
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.space_key == space_key && p.title == title)
            .map(|p| PageSummary {
                id: p.id.clone(),
                title: p.title.clone(),
            })
            .collect())
    }

    fn create_page(&self, content: &PageContent<'_>, version: u32) -> Result<Page, ConfluenceError> {
        self.record("create_page")?;
        let page = self.insert(
            content.space_key,
            content.title,
            content.body,
            content.parent_id,
            version,
        );
        Ok(Page::from(&page))
    }

    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        self.record("get_page")?;
        self.pages
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == page_id)
            .map(Page::from)
            .ok_or_else(|| Self::not_found(page_id))
    }

    fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        self.record("update_page")?;
        let mut pages = self.pages.write().unwrap();
        let page = pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or_else(|| Self::not_found(page_id))?;

        if version != page.version + 1 {
            return Err(ConfluenceError::HttpResponse {
                status: 409,
                body: format!(
                    "Version must be incremented on update. Current version is: {}",
                    page.version
                ),
            });
        }

        page.title = content.title.to_owned();
        page.body = content.body.to_owned();
        page.parent_id = content.parent_id.map(str::to_owned);
        page.version = version;
        Ok(Page::from(&*page))
    }

    fn upload_attachments(
        &self,
        page_id: &str,
        version: u32,
        files: &[AttachmentFile],
        minor_edit: bool,
    ) -> Result<Vec<Attachment>, ConfluenceError> {
        self.record("upload_attachments")?;
        self.uploads.write().unwrap().push(UploadCall {
            page_id: page_id.to_owned(),
            version,
            files: files.to_vec(),
            minor_edit,
        });
        Ok(files
            .iter()
            .enumerate()
            .map(|(i, f)| Attachment {
                id: format!("att{i}"),
                title: f.filename.clone(),
            })
            .collect())
    }
}
