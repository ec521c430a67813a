//! Confluence page types.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Confluence page as returned by create, update and get-by-id.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Version information.
    pub version: Version,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}

/// Page entry in a content search result.
///
/// Search results are requested without expansions, so only the
/// identifying fields are guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageSummary {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
}

/// Content search API response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSearchResponse {
    /// Matching pages.
    pub results: Vec<PageSummary>,
}

/// Fields written on create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContent<'a> {
    /// Target space key.
    pub space_key: &'a str,
    /// Page title, unique within the space.
    pub title: &'a str,
    /// Body in storage format.
    pub body: &'a str,
    /// Parent page ID; `None` places the page at the top of the space.
    pub parent_id: Option<&'a str>,
}

impl PageContent<'_> {
    /// JSON payload for the content API with the given version number.
    #[must_use]
    pub fn to_payload(&self, version: u32) -> Value {
        let ancestors: Vec<Value> = self
            .parent_id
            .map(|id| json!({ "id": id }))
            .into_iter()
            .collect();

        json!({
            "type": "page",
            "title": self.title,
            "space": { "key": self.space_key },
            "ancestors": ancestors,
            "body": {
                "storage": {
                    "value": self.body,
                    "representation": "storage"
                }
            },
            "version": { "number": version }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_with_parent() {
        let content = PageContent {
            space_key: "DOCS",
            title: "setup",
            body: "<p>Hi</p>",
            parent_id: Some("42"),
        };

        assert_eq!(
            content.to_payload(1),
            json!({
                "type": "page",
                "title": "setup",
                "space": { "key": "DOCS" },
                "ancestors": [{ "id": "42" }],
                "body": { "storage": { "value": "<p>Hi</p>", "representation": "storage" } },
                "version": { "number": 1 }
            })
        );
    }

    #[test]
    fn test_payload_without_parent_has_empty_ancestors() {
        let content = PageContent {
            space_key: "DOCS",
            title: "guides",
            body: "",
            parent_id: None,
        };

        let payload = content.to_payload(7);

        assert_eq!(payload["ancestors"], json!([]));
        assert_eq!(payload["version"]["number"], json!(7));
    }

    #[test]
    fn test_page_deserialize_ignores_unknown_fields() {
        let page: Page = serde_json::from_str(
            r#"{"id":"1","type":"page","status":"current","title":"T",
                "version":{"number":3,"minorEdit":false},
                "_links":{"webui":"/display/DOCS/T"}}"#,
        )
        .unwrap();

        assert_eq!(page.id, "1");
        assert_eq!(page.version.number, 3);
    }
}
