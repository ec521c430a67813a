//! Document tree produced by the parser and rewritten by the transformer.

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Value for the HTML `align` attribute, if any.
    #[must_use]
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

/// Node type with its type-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading { level: u8 },
    BlockQuote,
    List { start: Option<u64> },
    ListItem,
    TaskMarker { checked: bool },
    ThematicBreak,
    /// Fenced or indented code block. `lang` is the first word of the info string.
    Code { lang: Option<String>, value: String },
    Html { value: String },
    Table { alignments: Vec<Alignment> },
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Delete,
    Text { value: String },
    InlineCode { value: String },
    InlineHtml { value: String },
    SoftBreak,
    HardBreak,
    Link { url: String, title: String },
    Image { url: String, alt: String, title: String },
    /// Display math (`$$...$$`).
    Math { value: String },
    /// Inline math (`$...$`).
    InlineMath { value: String },
    /// Container for constructs without a dedicated kind; renders its children only.
    Fragment,
}

/// A node of the document tree.
///
/// Children keep their source order; rewrites replace nodes in place and
/// never reorder siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node without children.
    #[must_use]
    pub fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    #[must_use]
    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    /// Normalized image node referencing `url`, without alt text or title.
    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Image {
            url: url.into(),
            alt: String::new(),
            title: String::new(),
        })
    }

    /// Concatenated text of this subtree.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text { value }
            | NodeKind::InlineCode { value }
            | NodeKind::InlineMath { value }
            | NodeKind::Math { value } => out.push_str(value),
            NodeKind::SoftBreak | NodeKind::HardBreak => out.push(' '),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Iterate over this node and all descendants in depth-first pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::leaf(NodeKind::Text {
            value: value.to_owned(),
        })
    }

    #[test]
    fn test_text_content_nested() {
        let node = Node::with_children(
            NodeKind::Paragraph,
            vec![
                text("Hello "),
                Node::with_children(NodeKind::Strong, vec![text("bold")]),
                Node::leaf(NodeKind::SoftBreak),
                text("world"),
            ],
        );
        assert_eq!(node.text_content(), "Hello bold world");
    }

    #[test]
    fn test_descendants_preorder() {
        let tree = Node::with_children(
            NodeKind::Root,
            vec![
                Node::with_children(NodeKind::Paragraph, vec![text("a"), text("b")]),
                text("c"),
            ],
        );
        let texts: Vec<_> = tree
            .descendants()
            .filter_map(|n| match &n.kind {
                NodeKind::Text { value } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn test_normalized_image() {
        let node = Node::image("diagram-0.png");
        assert_eq!(
            node.kind,
            NodeKind::Image {
                url: "diagram-0.png".to_owned(),
                alt: String::new(),
                title: String::new(),
            }
        );
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_alignment_attr() {
        assert_eq!(Alignment::None.as_attr(), None);
        assert_eq!(Alignment::Center.as_attr(), Some("center"));
    }
}
