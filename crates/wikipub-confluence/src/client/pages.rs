//! Page operations for Confluence API.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::info;

use super::{ConfluenceClient, read_json};
use crate::error::ConfluenceError;
use crate::types::{Page, PageContent, PageSearchResponse, PageSummary};

impl ConfluenceClient {
    /// Find pages with exactly `title` in `space_key`.
    pub fn find_pages(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError> {
        let url = format!(
            "{}/content?spaceKey={}&title={}",
            self.api_url(),
            utf8_percent_encode(space_key, NON_ALPHANUMERIC),
            utf8_percent_encode(title, NON_ALPHANUMERIC)
        );

        info!("Looking up page '{}' in space {}", title, space_key);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", self.auth.header())
            .header("Accept", "application/json")
            .call()?;

        let result: PageSearchResponse = read_json(response)?;
        Ok(result.results)
    }

    /// Create a page with the given version number.
    pub fn create_page(
        &self,
        content: &PageContent<'_>,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content", self.api_url());
        let payload_bytes = serde_json::to_vec(&content.to_payload(version))?;

        info!(
            "Creating page '{}' in space {}",
            content.title, content.space_key
        );

        let response = self
            .agent
            .post(&url)
            .header("Authorization", self.auth.header())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: Page = read_json(response)?;
        info!("Created page {} (version {})", page.id, page.version.number);
        Ok(page)
    }

    /// Get page by ID, including its current version.
    pub fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}?expand=version", self.api_url(), page_id);

        info!("Getting page {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", self.auth.header())
            .header("Accept", "application/json")
            .call()?;

        read_json(response)
    }

    /// Update existing page, submitting `version` as the new version number.
    ///
    /// Confluence rejects the update unless `version` is the current version plus one.
    pub fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        let mut payload = content.to_payload(version);
        payload["id"] = serde_json::json!(page_id);
        let payload_bytes = serde_json::to_vec(&payload)?;

        info!("Updating page {} to version {}", page_id, version);

        let response = self
            .agent
            .put(&url)
            .header("Authorization", self.auth.header())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: Page = read_json(response)?;
        info!(
            "Updated page {} to version {}",
            page_id, page.version.number
        );
        Ok(page)
    }
}
