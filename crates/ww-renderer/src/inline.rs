//! Shared inline text resolution.
//!
//! Paragraphs, list items and table cells all resolve their text here.
//! Emphasis wrappers consume only their text content, so a defensive
//! one-level re-scan recovers images nested inside them; recursive
//! containers need no such pass since recursion reaches their images.

use std::fmt::Write;

use tracing::debug;
use ww_dom::{DocumentNode, Element, NodeKind};

use crate::engine::Converter;

/// Fixed file name behind the generic inline-image marker.
pub(crate) const GENERIC_IMAGE_FILE: &str = "User Workflow Icon.png";

impl Converter<'_> {
    /// Resolve the inline text of an element's children.
    pub(crate) fn render_inline(&mut self, element: &Element, in_table: bool) -> String {
        self.render_inline_children(&element.children, in_table, false)
    }

    /// Inline resolution over a child list.
    ///
    /// With `skip_nested_blocks`, nested lists and tables contribute
    /// nothing; list items use this to keep sublist text off the item's
    /// own line.
    pub(crate) fn render_inline_children(
        &mut self,
        children: &[DocumentNode],
        in_table: bool,
        skip_nested_blocks: bool,
    ) -> String {
        let mut text = String::new();
        for child in children {
            let element = match child {
                DocumentNode::Text(leaf) => {
                    text.push_str(leaf);
                    continue;
                }
                DocumentNode::Element(element) => element,
            };
            match element.kind {
                NodeKind::Strong => {
                    text.push_str(&self.tokens.bold);
                    text.push_str(&element.text_content());
                    text.push_str(&self.tokens.bold);
                    self.rescue_nested_images(element, &mut text);
                }
                NodeKind::Emphasis => {
                    text.push_str(&self.tokens.italic);
                    text.push_str(&element.text_content());
                    text.push_str(&self.tokens.italic);
                    self.rescue_nested_images(element, &mut text);
                }
                NodeKind::StyledSpan => {
                    let style = element.attr("style").unwrap_or_default();
                    write!(text, "<span style=\"{style}\">{}</span>", element.text_content())
                        .unwrap();
                    self.rescue_nested_images(element, &mut text);
                }
                NodeKind::Link => {
                    let label = element.text_content();
                    if let Some(href) = element.attr("href") {
                        write!(text, "[{href} {label}]").unwrap();
                    } else {
                        text.push_str(&label);
                    }
                    self.rescue_nested_images(element, &mut text);
                }
                NodeKind::Image => {
                    let reference = self.image_reference(element, in_table);
                    text.push_str(&reference);
                }
                NodeKind::List { .. } | NodeKind::Table if skip_nested_blocks => {}
                NodeKind::List { .. } if in_table => {
                    // A list inside a cell keeps its list markup.
                    let fragment = self.render_list(element, 1);
                    text.push_str(&fragment);
                }
                _ => {
                    let fragment =
                        self.render_inline_children(&element.children, in_table, skip_nested_blocks);
                    text.push_str(&fragment);
                }
            }
        }
        text
    }

    /// Emit the generic marker for images one level below a wrapper whose
    /// own rendering consumed only its text.
    fn rescue_nested_images(&mut self, element: &Element, text: &mut String) {
        for child in element.child_elements() {
            if child.kind == NodeKind::Image {
                self.state.image_counter += 1;
                write!(text, "[[File:{GENERIC_IMAGE_FILE}]]").unwrap();
            }
        }
    }

    /// A file reference for a stamped image.
    ///
    /// Outside table context the reference is wrapped as its own one-row
    /// block so the image renders standalone. An image the identity pass
    /// never stamped renders the generic marker instead of vanishing.
    fn image_reference(&mut self, image: &Element, in_table: bool) -> String {
        self.state.image_counter += 1;
        let Some(name) = image.attr(ww_dom::IMAGE_NAME_ATTR) else {
            debug!(
                position = self.state.image_counter,
                "image without stamped identity"
            );
            return format!("[[File:{GENERIC_IMAGE_FILE}]]");
        };
        let reference = format!("[[File:{name}]]");
        if in_table {
            reference
        } else {
            format!(
                "{}\n|{reference}\n{}",
                self.tokens.image_start, self.tokens.image_end
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ww_dom::{parse, stamp_image_identities};
    use ww_rules::SyntaxTokens;

    use crate::engine::Converter;

    fn inline(html: &str) -> String {
        let root = parse(html).unwrap();
        let tokens = SyntaxTokens::default();
        let mut converter = Converter::new(&tokens);
        let paragraph = root.child_elements().next().unwrap();
        converter.render_inline(paragraph, false)
    }

    #[test]
    fn test_text_and_emphasis() {
        assert_eq!(
            inline("<p>a <strong>b</strong> <em>c</em></p>"),
            "a '''b''' ''c''"
        );
    }

    #[test]
    fn test_styled_span_preserves_style() {
        assert_eq!(
            inline(r#"<p><span style="color:#ff0000">red</span></p>"#),
            r#"<span style="color:#ff0000">red</span>"#
        );
    }

    #[test]
    fn test_span_without_color_recurses() {
        assert_eq!(
            inline(r#"<p><span class="x">plain <strong>b</strong></span></p>"#),
            "plain '''b'''"
        );
    }

    #[test]
    fn test_link_with_and_without_href() {
        assert_eq!(
            inline(r#"<p><a href="https://w.test/page">label</a></p>"#),
            "[https://w.test/page label]"
        );
        assert_eq!(inline("<p><a>label</a></p>"), "label");
    }

    #[test]
    fn test_stamped_image_wrapped_as_block() {
        let mut root = parse(r#"<p><img src="a.png"/></p>"#).unwrap();
        stamp_image_identities(&mut root, "Doc");
        let tokens = SyntaxTokens::default();
        let mut converter = Converter::new(&tokens);
        let paragraph = root.child_elements().next().unwrap();

        assert_eq!(
            converter.render_inline(paragraph, false),
            "{| class=\"wikitable\"\n|[[File:Doc-1.png]]\n|}"
        );
    }

    #[test]
    fn test_stamped_image_bare_inside_table_context() {
        let mut root = parse(r#"<p><img src="a.png"/></p>"#).unwrap();
        stamp_image_identities(&mut root, "Doc");
        let tokens = SyntaxTokens::default();
        let mut converter = Converter::new(&tokens);
        let paragraph = root.child_elements().next().unwrap();

        assert_eq!(
            converter.render_inline(paragraph, true),
            "[[File:Doc-1.png]]"
        );
    }

    #[test]
    fn test_unstamped_image_renders_generic_marker() {
        assert_eq!(
            inline(r#"<p><img src="a.png"/></p>"#),
            "[[File:User Workflow Icon.png]]"
        );
    }

    #[test]
    fn test_image_inside_bold_wrapper_rescued() {
        // The bold wrapper renders only its text; the nested image must
        // still leave a marker behind.
        assert_eq!(
            inline(r#"<p><strong>see <img src="a.png"/></strong></p>"#),
            "'''see '''[[File:User Workflow Icon.png]]"
        );
    }
}
