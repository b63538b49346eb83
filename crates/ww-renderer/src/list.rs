//! Ordered and unordered list rendering.
//!
//! Bullet items keep a flat style at every depth. Ordered items number
//! decimally at the top level and alphabetically when nested, with an
//! explicit alphabetic list style forcing letters at any depth behind a
//! definition-indent prefix. Items are terminated with a hard break so
//! the target renderer separates them visually.

use std::fmt::Write;

use ww_dom::{Element, NodeKind};

use crate::engine::Converter;

/// Explicit line break terminating every rendered item.
const ITEM_BREAK: &str = "<br>";

/// Definition-indent prefix for style-forced alphabetic items.
const ALPHA_INDENT: &str = ":";

impl Converter<'_> {
    /// Render a list subtree at the given nesting level (1-based).
    pub(crate) fn render_list(&mut self, list: &Element, level: usize) -> String {
        let ordered = matches!(list.kind, NodeKind::List { ordered: true });
        let forced_alphabetic = ordered && has_alphabetic_marker(list);
        let mut out = String::new();
        let mut counter: usize = 1;

        for item in list.child_elements() {
            if item.kind != NodeKind::ListItem {
                continue;
            }

            let text = self.render_inline_children(&item.children, false, true);
            let text = text.trim();
            if !text.is_empty() {
                if ordered {
                    // An explicit item value re-seeds the running counter.
                    if let Some(value) = item
                        .attr("value")
                        .and_then(|value| value.parse::<usize>().ok())
                        .filter(|value| *value >= 1)
                    {
                        counter = value;
                    }
                    if forced_alphabetic {
                        write!(out, "{ALPHA_INDENT}{}. ", letter(counter)).unwrap();
                    } else if level > 1 {
                        write!(out, "{}. ", letter(counter)).unwrap();
                    } else {
                        write!(out, "{counter}. ").unwrap();
                    }
                    counter += 1;
                } else {
                    out.push_str(&self.tokens.bullet);
                    out.push(' ');
                }
                out.push_str(text);
                out.push_str(ITEM_BREAK);
                out.push('\n');
            }

            // Sublists follow the item's own line, one level deeper. An
            // item with no text of its own still contributes these.
            for sub in item.child_elements() {
                if matches!(sub.kind, NodeKind::List { .. }) {
                    let fragment = self.render_list(sub, level + 1);
                    out.push_str(&fragment);
                }
            }
        }
        out
    }
}

fn has_alphabetic_marker(list: &Element) -> bool {
    if list
        .attr("type")
        .is_some_and(|kind| kind.eq_ignore_ascii_case("a"))
    {
        return true;
    }
    list.attr("style")
        .is_some_and(|style| style.contains("lower-alpha") || style.contains("upper-alpha"))
}

/// Lowercase item letter, wrapping after `z`.
fn letter(ordinal: usize) -> char {
    char::from(b'a' + u8::try_from((ordinal - 1) % 26).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ww_dom::parse;
    use ww_rules::SyntaxTokens;

    use super::letter;
    use crate::engine::Converter;

    fn render(html: &str) -> String {
        let root = parse(html).unwrap();
        let tokens = SyntaxTokens::default();
        let mut converter = Converter::new(&tokens);
        let list = root.child_elements().next().unwrap();
        converter.render_list(list, 1)
    }

    #[test]
    fn test_unordered_flat_bullets() {
        assert_eq!(
            render("<ul><li>one</li><li>two</li></ul>"),
            "* one<br>\n* two<br>\n"
        );
    }

    #[test]
    fn test_unordered_nested_stays_flat() {
        assert_eq!(
            render("<ul><li>top<ul><li>inner</li></ul></li></ul>"),
            "* top<br>\n* inner<br>\n"
        );
    }

    #[test]
    fn test_ordered_decimal_numbering() {
        assert_eq!(
            render("<ol><li>first</li><li>second</li></ol>"),
            "1. first<br>\n2. second<br>\n"
        );
    }

    #[test]
    fn test_ordered_value_override_reseeds_counter() {
        assert_eq!(
            render(r#"<ol><li>a</li><li value="5">b</li><li>c</li></ol>"#),
            "1. a<br>\n5. b<br>\n6. c<br>\n"
        );
    }

    #[test]
    fn test_nested_ordered_uses_letters() {
        assert_eq!(
            render("<ol><li>top<ol><li>x</li><li>y</li></ol></li></ol>"),
            "1. top<br>\na. x<br>\nb. y<br>\n"
        );
    }

    #[test]
    fn test_alphabetic_style_forces_letters_with_indent() {
        assert_eq!(
            render(r#"<ol type="a"><li>x</li><li>y</li></ol>"#),
            ":a. x<br>\n:b. y<br>\n"
        );
    }

    #[test]
    fn test_letters_wrap_after_z() {
        assert_eq!(letter(26), 'z');
        assert_eq!(letter(27), 'a');
    }

    #[test]
    fn test_item_without_text_skipped_but_sublist_kept() {
        assert_eq!(
            render("<ul><li><ul><li>inner</li></ul></li><li>after</li></ul>"),
            "* inner<br>\n* after<br>\n"
        );
    }

    #[test]
    fn test_item_inline_formatting() {
        assert_eq!(
            render("<ul><li><strong>bold</strong> tail</li></ul>"),
            "* '''bold''' tail<br>\n"
        );
    }
}
