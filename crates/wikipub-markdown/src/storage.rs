//! Confluence storage format post-processing.
//!
//! Rewrites generic `<img src="X" />` tags into Confluence image macros.
//! The rewrite is a plain regex substitution and assumes filenames never
//! contain a double quote.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::asset::is_absolute_url;

static IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img src="([^"]*)" />"#).expect("valid regex"));

/// Convert generic markup into Confluence storage format.
///
/// Local sources become attachment references; absolute URLs become
/// `ri:url` references because they are never uploaded.
#[must_use]
pub fn to_storage_format(html: &str) -> String {
    IMG_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let src = &caps[1];
            if is_absolute_url(src) {
                format!(r#"<ac:image><ri:url ri:value="{src}" /></ac:image>"#)
            } else {
                format!(r#"<ac:image><ri:attachment ri:filename="{src}" /></ac:image>"#)
            }
        })
        .into_owned()
}
