//! Heading records and heading-derived naming.
//!
//! Headings are collected for downstream use such as asset naming; the
//! markup itself never depends on them.

use crate::node::{DocumentNode, Element, NodeKind};

/// Longest file name stem derived from a heading.
const MAX_NAME_LEN: usize = 50;

/// A document heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRecord {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Trimmed heading text.
    pub text: String,
}

/// Collect headings from a document tree in document order.
///
/// Headings with no text are skipped.
#[must_use]
pub fn collect_headings(root: &Element) -> Vec<HeadingRecord> {
    let mut headings = Vec::new();
    collect_subtree(root, &mut headings);
    headings
}

fn collect_subtree(element: &Element, headings: &mut Vec<HeadingRecord>) {
    for child in &element.children {
        let DocumentNode::Element(child) = child else {
            continue;
        };
        if let NodeKind::Heading(level) = child.kind {
            let text = child.text_content().trim().to_owned();
            if !text.is_empty() {
                headings.push(HeadingRecord { level, text });
            }
        }
        collect_subtree(child, headings);
    }
}

/// Turn heading text into a safe file name stem.
///
/// Filesystem-hostile characters become underscores, whitespace runs
/// collapse to a single underscore, and the result is capped in length.
#[must_use]
pub fn sanitize_file_name(text: &str) -> String {
    let mut result = String::new();
    let mut pending_space = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_space = !result.is_empty();
            continue;
        }
        if pending_space {
            result.push('_');
            pending_space = false;
        }
        if matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control() {
            result.push('_');
        } else {
            result.push(c);
        }
    }
    result.chars().take(MAX_NAME_LEN).collect()
}

/// The heading a given image most plausibly belongs to.
///
/// Distributes image positions evenly across the collected headings.
/// Falls back to synthetic section names when the document has no
/// headings at all.
#[must_use]
pub fn nearest_heading(
    headings: &[HeadingRecord],
    image_index: usize,
    total_images: usize,
) -> String {
    let total = total_images.max(1);
    if headings.is_empty() {
        let section = image_index / (total / 5).max(1) + 1;
        return format!("Section_{section}");
    }

    let slot = image_index * headings.len() / total;
    let heading = &headings[slot.min(headings.len() - 1)];
    sanitize_file_name(&heading.text)
}
