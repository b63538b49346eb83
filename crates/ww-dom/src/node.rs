//! Document tree node types.
//!
//! The tree mirrors the HTML-like output of the upstream document
//! converter. Each element is classified once at construction into a
//! closed [`NodeKind`], so downstream dispatch is exhaustive instead of
//! string-matching on tag names.

use std::collections::HashMap;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    /// An element with a tag, attributes and ordered children.
    Element(Element),
    /// A text leaf.
    Text(String),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Classified node kind.
    pub kind: NodeKind,
    /// Lowercased tag name.
    pub tag: String,
    /// Attribute map.
    pub attrs: HashMap<String, String>,
    /// Children in document order.
    pub children: Vec<DocumentNode>,
}

/// Classified element kinds the converter understands.
///
/// Everything else lands in [`NodeKind::Container`] (known grouping tags)
/// or [`NodeKind::Unknown`] (unrecognized tags); both are transparently
/// recursed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Heading with level 1 through 6.
    Heading(u8),
    /// Paragraph.
    Paragraph,
    /// Ordered or unordered list.
    List {
        /// Whether the list is ordered.
        ordered: bool,
    },
    /// List item.
    ListItem,
    /// Table.
    Table,
    /// Table row.
    Row,
    /// Table cell.
    Cell {
        /// Whether the cell is a header cell.
        header: bool,
    },
    /// Inline or block image.
    Image,
    /// Anchor link.
    Link,
    /// Span carrying an inline color style.
    StyledSpan,
    /// Italic emphasis.
    Emphasis,
    /// Bold emphasis.
    Strong,
    /// Forced line break.
    LineBreak,
    /// Page category marker.
    Category,
    /// Known grouping element with no markup of its own.
    Container,
    /// Unrecognized tag.
    Unknown,
}

impl Element {
    /// Create an element, classifying its kind from tag and attributes.
    #[must_use]
    pub fn new(tag: String, attrs: HashMap<String, String>) -> Self {
        let kind = classify(&tag, &attrs);
        Self {
            kind,
            tag,
            attrs,
            children: Vec::new(),
        }
    }

    /// Synthetic document root.
    #[must_use]
    pub fn root() -> Self {
        Self::new("root".to_owned(), HashMap::new())
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: String) {
        self.attrs.insert(name.to_owned(), value);
    }

    /// Concatenated text content of this subtree.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }

    /// Child elements, skipping text leaves.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            DocumentNode::Element(element) => Some(element),
            DocumentNode::Text(_) => None,
        })
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            DocumentNode::Text(text) => out.push_str(text),
            DocumentNode::Element(child) => collect_text(child, out),
        }
    }
}

fn classify(tag: &str, attrs: &HashMap<String, String>) -> NodeKind {
    match tag {
        "h1" => NodeKind::Heading(1),
        "h2" => NodeKind::Heading(2),
        "h3" => NodeKind::Heading(3),
        "h4" => NodeKind::Heading(4),
        "h5" => NodeKind::Heading(5),
        "h6" => NodeKind::Heading(6),
        "p" => NodeKind::Paragraph,
        "ul" => NodeKind::List { ordered: false },
        "ol" => NodeKind::List { ordered: true },
        "li" => NodeKind::ListItem,
        "table" => NodeKind::Table,
        "tr" => NodeKind::Row,
        "th" => NodeKind::Cell { header: true },
        "td" => NodeKind::Cell { header: false },
        "img" => NodeKind::Image,
        "a" => NodeKind::Link,
        "em" | "i" => NodeKind::Emphasis,
        "strong" | "b" => NodeKind::Strong,
        "br" => NodeKind::LineBreak,
        "category" => NodeKind::Category,
        "span" => {
            if attrs.get("style").is_some_and(|style| style.contains("color")) {
                NodeKind::StyledSpan
            } else {
                NodeKind::Container
            }
        }
        "root" | "html" | "body" | "div" | "section" | "thead" | "tbody" | "tfoot" => {
            NodeKind::Container
        }
        _ => NodeKind::Unknown,
    }
}
