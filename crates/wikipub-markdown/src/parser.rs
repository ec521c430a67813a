//! Markdown parsing into a [`Node`] tree.
//!
//! Built on `pulldown-cmark` with tables, strikethrough, task lists and
//! math enabled. Events are folded into an owned tree so that the
//! transformer can rewrite nodes in place.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::tree::{Alignment, Node, NodeKind};

/// Parser options: GFM tables, strikethrough, task lists, and `$` math.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH
}

/// Parse markdown text into a document tree rooted at [`NodeKind::Root`].
#[must_use]
pub fn parse_markdown(markdown: &str) -> Node {
    let mut stack = vec![Node::leaf(NodeKind::Root)];

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(tag) => stack.push(Node::leaf(kind_for_tag(tag))),
            Event::End(_) => close(&mut stack),
            Event::Text(text) => push_text(&mut stack, &text),
            Event::Code(code) => push_leaf(
                &mut stack,
                NodeKind::InlineCode {
                    value: code.into_string(),
                },
            ),
            Event::InlineMath(math) => push_leaf(
                &mut stack,
                NodeKind::InlineMath {
                    value: math.into_string(),
                },
            ),
            Event::DisplayMath(math) => push_leaf(
                &mut stack,
                NodeKind::Math {
                    value: math.into_string(),
                },
            ),
            Event::Html(html) => push_html(&mut stack, &html),
            Event::InlineHtml(html) => push_leaf(
                &mut stack,
                NodeKind::InlineHtml {
                    value: html.into_string(),
                },
            ),
            Event::SoftBreak => push_leaf(&mut stack, NodeKind::SoftBreak),
            Event::HardBreak => push_leaf(&mut stack, NodeKind::HardBreak),
            Event::Rule => push_leaf(&mut stack, NodeKind::ThematicBreak),
            Event::TaskListMarker(checked) => {
                push_leaf(&mut stack, NodeKind::TaskMarker { checked });
            }
            // Footnotes are not enabled.
            _ => {}
        }
    }

    // Fold anything left open back into the root.
    while let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(finish(node)),
            None => return node,
        }
    }
    Node::leaf(NodeKind::Root)
}

fn kind_for_tag(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading {
            level: heading_level_to_num(level),
        },
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(kind) => NodeKind::Code {
            lang: match kind {
                CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                CodeBlockKind::Indented => None,
            },
            value: String::new(),
        },
        Tag::HtmlBlock => NodeKind::Html {
            value: String::new(),
        },
        Tag::List(start) => NodeKind::List { start },
        Tag::Item => NodeKind::ListItem,
        Tag::Table(alignments) => NodeKind::Table {
            alignments: alignments.into_iter().map(convert_alignment).collect(),
        },
        Tag::TableHead => NodeKind::TableHead,
        Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Delete,
        Tag::Link {
            dest_url, title, ..
        } => NodeKind::Link {
            url: dest_url.into_string(),
            title: title.into_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => NodeKind::Image {
            url: dest_url.into_string(),
            alt: String::new(),
            title: title.into_string(),
        },
        _ => NodeKind::Fragment,
    }
}

fn convert_alignment(alignment: pulldown_cmark::Alignment) -> Alignment {
    match alignment {
        pulldown_cmark::Alignment::None => Alignment::None,
        pulldown_cmark::Alignment::Left => Alignment::Left,
        pulldown_cmark::Alignment::Center => Alignment::Center,
        pulldown_cmark::Alignment::Right => Alignment::Right,
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Pop the innermost open node and attach it to its parent.
fn close(stack: &mut Vec<Node>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(node) = stack.pop()
        && let Some(parent) = stack.last_mut()
    {
        parent.children.push(finish(node));
    }
}

/// Final fixups applied when a node is closed.
fn finish(mut node: Node) -> Node {
    if let NodeKind::Image { alt, .. } = &mut node.kind {
        // Alt text arrives as child events; keep it as an attribute instead.
        *alt = node.children.iter().map(Node::text_content).collect();
        node.children.clear();
    }
    node
}

fn push_leaf(stack: &mut [Node], kind: NodeKind) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::leaf(kind));
    }
}

fn push_text(stack: &mut [Node], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let NodeKind::Code { value, .. } = &mut parent.kind {
        value.push_str(text);
    } else {
        parent.children.push(Node::leaf(NodeKind::Text {
            value: text.to_owned(),
        }));
    }
}

fn push_html(stack: &mut [Node], html: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let NodeKind::Html { value } = &mut parent.kind {
        value.push_str(html);
    } else {
        parent.children.push(Node::leaf(NodeKind::Html {
            value: html.to_owned(),
        }));
    }
}
