//! Tree walking and markup emission.
//!
//! The walker dispatches on classified node kinds and tracks one piece of
//! cross-sibling state: whether a heading has opened a content block that
//! is still unterminated. Each heading closes the previous block, emits
//! itself, and opens a fresh one; the block covering the document tail is
//! closed after the walk.

use ww_dom::{Element, NodeKind};
use ww_rules::SyntaxTokens;

use crate::postprocess::collapse_blank_lines;

/// Mutable state for one conversion, created fresh per call.
#[derive(Debug, Default)]
pub(crate) struct ConversionState {
    /// Whether a heading-opened content block is currently unterminated.
    pub(crate) block_open: bool,
    /// Sequential position of the last image emitted, for diagnostics and
    /// positional alignment with the stamped identities.
    pub(crate) image_counter: usize,
}

/// Rule-driven document tree to wiki markup converter.
///
/// One converter performs one conversion; its state is discarded with it,
/// so nothing leaks between documents.
pub struct Converter<'a> {
    pub(crate) tokens: &'a SyntaxTokens,
    pub(crate) state: ConversionState,
}

impl<'a> Converter<'a> {
    /// Create a converter over resolved syntax tokens.
    #[must_use]
    pub fn new(tokens: &'a SyntaxTokens) -> Self {
        Self {
            tokens,
            state: ConversionState::default(),
        }
    }

    /// Convert a document tree to wiki markup.
    ///
    /// The returned markup is blank-line normalized but not yet cleaned of
    /// vestigial empty blocks; see [`crate::PostProcessor`].
    #[must_use]
    pub fn convert(mut self, root: &Element) -> String {
        let mut markup = self.walk(root);
        if self.state.block_open {
            markup.push_str(&self.tokens.table_end);
        }
        collapse_blank_lines(&markup)
    }

    pub(crate) fn walk(&mut self, element: &Element) -> String {
        let mut out = String::new();
        for child in element.child_elements() {
            out.push_str(&self.visit(child));
        }
        out
    }

    fn visit(&mut self, element: &Element) -> String {
        match element.kind {
            NodeKind::Heading(level) => self.heading(element, level),
            NodeKind::Paragraph => {
                let mut out = self.render_inline(element, false);
                out.push_str("\n\n");
                out
            }
            NodeKind::List { .. } => {
                let mut out = self.render_list(element, 1);
                out.push('\n');
                out
            }
            NodeKind::Table => {
                let mut out = self.render_table(element);
                out.push_str("\n\n");
                out
            }
            NodeKind::Image => self.block_image(element),
            NodeKind::Category => {
                let mut out = self.tokens.category.clone();
                out.push('\n');
                out
            }
            NodeKind::ListItem
            | NodeKind::Row
            | NodeKind::Cell { .. }
            | NodeKind::Link
            | NodeKind::StyledSpan
            | NodeKind::Emphasis
            | NodeKind::Strong
            | NodeKind::LineBreak
            | NodeKind::Container
            | NodeKind::Unknown => self.walk(element),
        }
    }

    fn heading(&mut self, element: &Element, level: u8) -> String {
        let mut out = String::new();
        if self.state.block_open {
            out.push('\n');
            out.push_str(&self.tokens.table_end);
            out.push_str("\n\n");
        }
        let marker = self.tokens.heading_marker.repeat(usize::from(level));
        out.push_str(&marker);
        out.push_str(element.text_content().trim());
        out.push_str(&marker);
        out.push_str("\n\n");
        out.push_str(&self.tokens.table_start);
        out.push_str("\n|\n\n");
        self.state.block_open = true;
        out
    }

    /// A bare image outside inline processing emits a direct file
    /// reference from its source name.
    fn block_image(&mut self, element: &Element) -> String {
        self.state.image_counter += 1;
        let name = element
            .attr("src")
            .or_else(|| element.attr(ww_dom::IMAGE_NAME_ATTR))
            .unwrap_or(crate::inline::GENERIC_IMAGE_FILE);
        let alt = element.attr("alt").unwrap_or_default();
        if alt.is_empty() {
            format!("[[File:{name}]]\n")
        } else {
            format!("[[File:{name}|{alt}]]\n")
        }
    }
}
