//! Create-or-update protocol for a single page.
//!
//! ```text
//! lookup(title) ──> NotFound ──plan──> Create            ──apply──> version 1
//!               └─> Found{id} ──plan──> Update{id, v}    ──apply──> version v + 1
//! ```
//!
//! The current version is read during planning and is the precondition of
//! the update: Confluence rejects a write whose version is not exactly the
//! current one plus one. Concurrent external edits are not detected.

use std::fmt;

use tracing::{debug, info, warn};

use super::error::SyncError;
use crate::api::WikiApi;
use crate::types::PageContent;

/// Version number of a newly created page.
pub const INITIAL_VERSION: u32 = 1;

/// Result of looking a title up in the space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    NotFound,
    Found { id: String },
}

/// Write to perform for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPlan {
    Create,
    Update { id: String, current_version: u32 },
}

impl SyncPlan {
    /// Version number submitted with the write.
    #[must_use]
    pub fn next_version(&self) -> u32 {
        match self {
            Self::Create => INITIAL_VERSION,
            Self::Update {
                current_version, ..
            } => current_version + 1,
        }
    }
}

/// What happened to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Created,
    Updated,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("Created"),
            Self::Updated => f.write_str("Updated"),
        }
    }
}

/// Page written by [`Synchronizer::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedPage {
    pub id: String,
    pub title: String,
    /// Version just written.
    pub version: u32,
    pub action: SyncAction,
}

/// Synchronizes pages of one space.
pub struct Synchronizer<'a> {
    api: &'a dyn WikiApi,
    space_key: &'a str,
}

impl<'a> Synchronizer<'a> {
    #[must_use]
    pub fn new(api: &'a dyn WikiApi, space_key: &'a str) -> Self {
        Self { api, space_key }
    }

    /// Create or update the page titled `title`.
    ///
    /// The parent is resolved first, so a missing parent fails before any write.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MissingParent`] if `parent_title` names no page,
    /// or [`SyncError::Api`] if a Confluence call fails.
    pub fn sync(
        &self,
        title: &str,
        body: &str,
        parent_title: Option<&str>,
        default_parent_id: Option<&str>,
    ) -> Result<SyncedPage, SyncError> {
        let parent_id = self.resolve_parent(parent_title, default_parent_id)?;
        let state = self.lookup(title)?;
        let plan = self.plan(state)?;
        self.apply(&plan, title, body, parent_id.as_deref())
    }

    /// Parent page ID for a document.
    ///
    /// A derived parent title takes precedence over `default_parent_id`; the
    /// default applies only when the document has no parent title.
    pub fn resolve_parent(
        &self,
        parent_title: Option<&str>,
        default_parent_id: Option<&str>,
    ) -> Result<Option<String>, SyncError> {
        let Some(parent_title) = parent_title else {
            return Ok(default_parent_id.map(str::to_owned));
        };

        let pages = self.api.find_pages(self.space_key, parent_title)?;
        let parent = pages
            .into_iter()
            .next()
            .ok_or_else(|| SyncError::MissingParent {
                title: parent_title.to_owned(),
                space_key: self.space_key.to_owned(),
            })?;

        debug!("Resolved parent '{}' to page {}", parent_title, parent.id);
        Ok(Some(parent.id))
    }

    /// Look `title` up in the space.
    pub fn lookup(&self, title: &str) -> Result<PageState, SyncError> {
        let pages = self.api.find_pages(self.space_key, title)?;
        if pages.len() > 1 {
            warn!(
                "{} pages titled '{}' in space {}, using the first",
                pages.len(),
                title,
                self.space_key
            );
        }

        Ok(match pages.into_iter().next() {
            Some(page) => PageState::Found { id: page.id },
            None => PageState::NotFound,
        })
    }

    /// Turn a lookup into a write plan, reading the current version of a found page.
    pub fn plan(&self, state: PageState) -> Result<SyncPlan, SyncError> {
        match state {
            PageState::NotFound => Ok(SyncPlan::Create),
            PageState::Found { id } => {
                let page = self.api.get_page(&id)?;
                Ok(SyncPlan::Update {
                    id,
                    current_version: page.version.number,
                })
            }
        }
    }

    /// Perform the planned write.
    pub fn apply(
        &self,
        plan: &SyncPlan,
        title: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<SyncedPage, SyncError> {
        let content = PageContent {
            space_key: self.space_key,
            title,
            body,
            parent_id,
        };
        let version = plan.next_version();

        let (page, action) = match plan {
            SyncPlan::Create => (
                self.api.create_page(&content, version)?,
                SyncAction::Created,
            ),
            SyncPlan::Update { id, .. } => (
                self.api.update_page(id, &content, version)?,
                SyncAction::Updated,
            ),
        };

        info!(
            "{} page '{}' ({}) at version {}",
            action, title, page.id, page.version.number
        );

        Ok(SyncedPage {
            id: page.id,
            title: page.title,
            version: page.version.number,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfluenceError;
    use crate::mock::MockWiki;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_when_not_found() {
        let wiki = MockWiki::new();
        let sync = Synchronizer::new(&wiki, "DOCS");

        let page = sync.sync("setup", "<p>x</p>", None, None).unwrap();

        assert_eq!(page.action, SyncAction::Created);
        assert_eq!(page.version, 1);
        let stored = wiki.page("setup").unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.body, "<p>x</p>");
        assert_eq!(stored.parent_id, None);
        assert_eq!(wiki.calls(), vec!["find_pages", "create_page"]);
    }

    #[test]
    fn test_update_increments_version() {
        let wiki = MockWiki::new().with_page("DOCS", "setup", 4);
        let sync = Synchronizer::new(&wiki, "DOCS");

        let page = sync.sync("setup", "<p>new</p>", None, None).unwrap();

        assert_eq!(page.action, SyncAction::Updated);
        assert_eq!(page.version, 5);
        assert_eq!(wiki.page("setup").unwrap().body, "<p>new</p>");
        assert_eq!(wiki.calls(), vec!["find_pages", "get_page", "update_page"]);
    }

    #[test]
    fn test_repeated_sync_updates_by_one_per_run() {
        let wiki = MockWiki::new();
        let sync = Synchronizer::new(&wiki, "DOCS");

        let first = sync.sync("setup", "a", None, None).unwrap();
        let second = sync.sync("setup", "a", None, None).unwrap();
        let third = sync.sync("setup", "a", None, None).unwrap();

        assert_eq!(first.action, SyncAction::Created);
        assert_eq!(second.action, SyncAction::Updated);
        assert_eq!(third.action, SyncAction::Updated);
        assert_eq!(
            [first.version, second.version, third.version],
            [1, 2, 3]
        );
        assert_eq!(second.id, first.id);
        assert_eq!(wiki.pages().len(), 1);
    }

    #[test]
    fn test_parent_resolved_by_title() {
        let wiki = MockWiki::new().with_page("DOCS", "guides", 1);
        let parent_id = wiki.page("guides").unwrap().id;
        let sync = Synchronizer::new(&wiki, "DOCS");

        sync.sync("setup", "", Some("guides"), None).unwrap();

        assert_eq!(wiki.page("setup").unwrap().parent_id, Some(parent_id));
    }

    #[test]
    fn test_parent_title_overrides_default_parent() {
        let wiki = MockWiki::new().with_page("DOCS", "guides", 1);
        let parent_id = wiki.page("guides").unwrap().id;
        let sync = Synchronizer::new(&wiki, "DOCS");

        let resolved = sync.resolve_parent(Some("guides"), Some("999")).unwrap();

        assert_eq!(resolved, Some(parent_id));
    }

    #[test]
    fn test_default_parent_without_parent_title() {
        let wiki = MockWiki::new();
        let sync = Synchronizer::new(&wiki, "DOCS");

        sync.sync("guides", "", None, Some("999")).unwrap();

        assert_eq!(wiki.page("guides").unwrap().parent_id.as_deref(), Some("999"));
    }

    #[test]
    fn test_missing_parent_fails_before_write() {
        let wiki = MockWiki::new().with_page("DOCS", "setup", 2);
        let sync = Synchronizer::new(&wiki, "DOCS");

        let err = sync.sync("setup", "", Some("guides"), Some("999")).unwrap_err();

        assert!(matches!(
            &err,
            SyncError::MissingParent { title, .. } if title == "guides"
        ));
        assert_eq!(wiki.calls(), vec!["find_pages"]);
        assert_eq!(wiki.page("setup").unwrap().version, 2);
    }

    #[test]
    fn test_parent_lookup_scoped_to_space() {
        let wiki = MockWiki::new().with_page("OTHER", "guides", 1);
        let sync = Synchronizer::new(&wiki, "DOCS");

        let err = sync.resolve_parent(Some("guides"), None).unwrap_err();

        assert_eq!(
            err.to_string(),
            "parent page 'guides' not found in space DOCS"
        );
    }

    #[test]
    fn test_plan_reads_current_version() {
        let wiki = MockWiki::new().with_page("DOCS", "setup", 7);
        let id = wiki.page("setup").unwrap().id;
        let sync = Synchronizer::new(&wiki, "DOCS");

        let state = sync.lookup("setup").unwrap();
        let plan = sync.plan(state).unwrap();

        assert_eq!(
            plan,
            SyncPlan::Update {
                id,
                current_version: 7
            }
        );
        assert_eq!(plan.next_version(), 8);
        assert_eq!(SyncPlan::Create.next_version(), INITIAL_VERSION);
    }

    #[test]
    fn test_stale_plan_rejected() {
        let wiki = MockWiki::new().with_page("DOCS", "setup", 3);
        let id = wiki.page("setup").unwrap().id;
        let sync = Synchronizer::new(&wiki, "DOCS");
        let stale = SyncPlan::Update {
            id,
            current_version: 1,
        };

        let err = sync.apply(&stale, "setup", "", None).unwrap_err();

        assert!(matches!(
            err,
            SyncError::Api(ConfluenceError::HttpResponse { status: 409, .. })
        ));
    }

    #[test]
    fn test_action_display() {
        assert_eq!(SyncAction::Created.to_string(), "Created");
        assert_eq!(SyncAction::Updated.to_string(), "Updated");
    }
}
