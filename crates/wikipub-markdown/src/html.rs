//! Serialization of the document tree to XHTML-compatible markup.
//!
//! Void elements are always self-closed (`<img src="…" />`, `<br />`,
//! `<hr />`), which the storage-format rewrite in [`crate::storage`] relies on.

use std::fmt::Write;

use crate::tree::{Alignment, Node, NodeKind};

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render a document tree to markup.
#[must_use]
pub fn to_html(root: &Node) -> String {
    let mut out = String::with_capacity(4096);
    render_node(root, &mut out);
    out
}

fn render_children(node: &Node, out: &mut String) {
    for child in &node.children {
        render_node(child, out);
    }
}

/// Render block-level children, one per line.
fn render_blocks(node: &Node, out: &mut String) {
    for (i, child) in node.children.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_node(child, out);
    }
}

fn wrap(tag: &str, node: &Node, out: &mut String) {
    let _ = write!(out, "<{tag}>");
    render_children(node, out);
    let _ = write!(out, "</{tag}>");
}

fn render_node(node: &Node, out: &mut String) {
    match &node.kind {
        NodeKind::Root => render_blocks(node, out),
        NodeKind::Fragment => render_children(node, out),
        NodeKind::Paragraph => wrap("p", node, out),
        NodeKind::Heading { level } => {
            let tag = format!("h{level}");
            wrap(&tag, node, out);
        }
        NodeKind::BlockQuote => {
            out.push_str("<blockquote>\n");
            render_blocks(node, out);
            out.push_str("\n</blockquote>");
        }
        NodeKind::List { start: Some(start) } => {
            if *start == 1 {
                out.push_str("<ol>\n");
            } else {
                let _ = writeln!(out, "<ol start=\"{start}\">");
            }
            render_blocks(node, out);
            out.push_str("\n</ol>");
        }
        NodeKind::List { start: None } => {
            out.push_str("<ul>\n");
            render_blocks(node, out);
            out.push_str("\n</ul>");
        }
        NodeKind::ListItem => wrap("li", node, out),
        NodeKind::TaskMarker { checked } => out.push_str(if *checked { "[x] " } else { "[ ] " }),
        NodeKind::ThematicBreak => out.push_str("<hr />"),
        NodeKind::Code { lang, value } => {
            match lang {
                Some(lang) => {
                    let _ = write!(
                        out,
                        "<pre><code class=\"language-{}\">",
                        escape_html(lang)
                    );
                }
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&escape_html(value));
            out.push_str("</code></pre>");
        }
        NodeKind::Html { value } | NodeKind::InlineHtml { value } => out.push_str(value),
        NodeKind::Table { alignments } => render_table(node, alignments, out),
        // Only reachable when rendered outside a table.
        NodeKind::TableHead | NodeKind::TableRow => {
            out.push_str("<tr>");
            render_cells(node, "td", &[], out);
            out.push_str("</tr>");
        }
        NodeKind::TableCell => wrap("td", node, out),
        NodeKind::Emphasis => wrap("em", node, out),
        NodeKind::Strong => wrap("strong", node, out),
        NodeKind::Delete => wrap("del", node, out),
        NodeKind::Text { value } => out.push_str(&escape_html(value)),
        NodeKind::InlineCode { value } => {
            let _ = write!(out, "<code>{}</code>", escape_html(value));
        }
        NodeKind::SoftBreak => out.push('\n'),
        NodeKind::HardBreak => out.push_str("<br />"),
        NodeKind::Link { url, title } => {
            let _ = write!(out, "<a href=\"{}\"", escape_html(url));
            if !title.is_empty() {
                let _ = write!(out, " title=\"{}\"", escape_html(title));
            }
            out.push('>');
            render_children(node, out);
            out.push_str("</a>");
        }
        NodeKind::Image { url, alt, title } => {
            let _ = write!(out, "<img src=\"{}\"", escape_html(url));
            if !alt.is_empty() {
                let _ = write!(out, " alt=\"{}\"", escape_html(alt));
            }
            if !title.is_empty() {
                let _ = write!(out, " title=\"{}\"", escape_html(title));
            }
            out.push_str(" />");
        }
        // Math that was not rendered to an image stays readable as code.
        NodeKind::Math { value } => {
            let _ = write!(
                out,
                "<pre><code class=\"language-math\">{}</code></pre>",
                escape_html(value)
            );
        }
        NodeKind::InlineMath { value } => {
            let _ = write!(
                out,
                "<code class=\"language-math\">{}</code>",
                escape_html(value)
            );
        }
    }
}

fn render_table(node: &Node, alignments: &[Alignment], out: &mut String) {
    out.push_str("<table>\n");
    let mut body_open = false;
    for child in &node.children {
        match child.kind {
            NodeKind::TableHead => {
                out.push_str("<thead>\n<tr>");
                render_cells(child, "th", alignments, out);
                out.push_str("</tr>\n</thead>\n");
            }
            NodeKind::TableRow => {
                if !body_open {
                    out.push_str("<tbody>\n");
                    body_open = true;
                }
                out.push_str("<tr>");
                render_cells(child, "td", alignments, out);
                out.push_str("</tr>\n");
            }
            _ => render_node(child, out),
        }
    }
    if body_open {
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>");
}

fn render_cells(row: &Node, tag: &str, alignments: &[Alignment], out: &mut String) {
    for (i, cell) in row.children.iter().enumerate() {
        match alignments.get(i).and_then(|a| a.as_attr()) {
            Some(align) => {
                let _ = write!(out, "<{tag} align=\"{align}\">");
            }
            None => {
                let _ = write!(out, "<{tag}>");
            }
        }
        render_children(cell, out);
        let _ = write!(out, "</{tag}>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        to_html(&parse_markdown(markdown))
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(
            render("## Setup\n\nHello **world** and ~~old~~."),
            "<h2>Setup</h2>\n<p>Hello <strong>world</strong> and <del>old</del>.</p>"
        );
    }

    #[test]
    fn test_normalized_image_self_closing() {
        let root = Node::with_children(
            NodeKind::Root,
            vec![Node::with_children(
                NodeKind::Paragraph,
                vec![Node::image("diagram-0.png")],
            )],
        );
        assert_eq!(to_html(&root), r#"<p><img src="diagram-0.png" /></p>"#);
    }

    #[test]
    fn test_image_with_alt_and_title() {
        assert_eq!(
            render("![Alt](a.png \"T\")"),
            r#"<p><img src="a.png" alt="Alt" title="T" /></p>"#
        );
    }

    #[test]
    fn test_code_block_escaped() {
        assert_eq!(
            render("```html\n<b>x</b>\n```\n"),
            "<pre><code class=\"language-html\">&lt;b&gt;x&lt;/b&gt;\n</code></pre>"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            render("- a\n- b\n"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
        );
        assert_eq!(render("2. a\n"), "<ol start=\"2\">\n<li>a</li>\n</ol>");
        assert_eq!(render("1. a\n"), "<ol>\n<li>a</li>\n</ol>");
    }

    #[test]
    fn test_task_list_markers() {
        assert_eq!(
            render("- [x] done\n- [ ] open\n"),
            "<ul>\n<li>[x] done</li>\n<li>[ ] open</li>\n</ul>"
        );
    }

    #[test]
    fn test_table() {
        assert_eq!(
            render("| a | b |\n|:-:|---|\n| 1 | 2 |\n"),
            "<table>\n<thead>\n<tr><th align=\"center\">a</th><th>b</th></tr>\n</thead>\n\
             <tbody>\n<tr><td align=\"center\">1</td><td>2</td></tr>\n</tbody>\n</table>"
        );
    }

    #[test]
    fn test_breaks_self_closing() {
        assert_eq!(render("a  \nb\n\n---"), "<p>a<br />b</p>\n<hr />");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("[docs](https://example.com?a=1&b=2 \"Docs\")"),
            r#"<p><a href="https://example.com?a=1&amp;b=2" title="Docs">docs</a></p>"#
        );
    }

    #[test]
    fn test_unrendered_math_as_code() {
        assert_eq!(
            render("$x<1$"),
            r#"<p><code class="language-math">x&lt;1</code></p>"#
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            render("> quoted"),
            "<blockquote>\n<p>quoted</p>\n</blockquote>"
        );
    }
}
