//! Rule-driven conversion of document trees to wiki markup.
//!
//! The engine walks an HTML-like document tree (see `ww-dom`) and emits
//! wiki markup using syntax tokens resolved from a rule set (see
//! `ww-rules`). Conversion is synchronous, performs no I/O, and keeps all
//! mutable state inside one [`Converter`] instance, so independent
//! conversions never interfere.
//!
//! # Example
//!
//! ```
//! use ww_rules::SyntaxTokens;
//!
//! let root = ww_dom::parse("<p>Hello <strong>world</strong></p>").unwrap();
//! let tokens = SyntaxTokens::default();
//! let markup = ww_renderer::convert_document(&root, &tokens);
//! assert_eq!(markup, "Hello '''world'''\n\n");
//! ```

mod engine;
mod inline;
mod list;
mod postprocess;
mod table;

pub use engine::Converter;
pub use postprocess::{PostProcessor, collapse_blank_lines};

use ww_dom::Element;
use ww_rules::SyntaxTokens;

/// Convert a document tree to cleaned wiki markup.
///
/// Runs the tree walk and the textual post-processing pass. Image
/// elements should be identity-stamped first when asset references are
/// wanted; unstamped images render a placeholder marker.
#[must_use]
pub fn convert_document(root: &Element, tokens: &SyntaxTokens) -> String {
    let markup = Converter::new(tokens).convert(root);
    PostProcessor::new(tokens).apply(&markup)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ww_dom::{parse, stamp_image_identities};
    use ww_rules::{RuleSet, SyntaxTokens};

    use super::convert_document;

    fn convert(html: &str) -> String {
        let root = parse(html).unwrap();
        convert_document(&root, &SyntaxTokens::default())
    }

    #[test]
    fn test_paragraph_scenario() {
        assert_eq!(
            convert("<p>Hello <strong>world</strong></p>"),
            "Hello '''world'''\n\n"
        );
    }

    #[test]
    fn test_consecutive_headings_scenario() {
        let markup = convert("<h1>Intro</h1><h1>Next</h1>");
        assert!(markup.contains("=Intro="));
        assert!(markup.contains("=Next="));
        assert!(!markup.contains(r#"{| class="wikitable""#));
    }

    #[test]
    fn test_hyphen_cell_scenario() {
        let markup = convert(
            "<table><tr><td>Feature</td></tr><tr><td>-</td></tr></table>",
        );
        assert!(markup.contains("||\n"));
        assert!(!markup.contains("|| -"));
    }

    #[test]
    fn test_full_document_with_stamped_images() {
        let mut root = parse(concat!(
            "<h1>Guide</h1>",
            "<p>Start <strong>here</strong>.</p>",
            r#"<p><img src="shot.png"/></p>"#,
            "<ul><li>step</li></ul>",
        ))
        .unwrap();
        let catalog = stamp_image_identities(&mut root, "Guide");
        assert_eq!(catalog.len(), 1);

        let markup = convert_document(&root, &SyntaxTokens::default());
        assert!(markup.contains("=Guide="));
        assert!(markup.contains("Start '''here'''."));
        assert!(markup.contains("[[File:Guide-1.png]]"));
        assert!(markup.contains("* step<br>"));
        assert!(markup.ends_with("|}"));
    }

    #[test]
    fn test_custom_rule_set_end_to_end() {
        let rules = RuleSet::from_json(
            r#"{"rules": [
                {"name": "Bold and Italics", "syntax": {"bold": "**"}},
                {"name": "Bullets", "syntax": "-"},
                {"name": "Create a Table", "syntax": {"start": "[table]", "end": "[/table]", "column": "|"}}
            ]}"#,
        )
        .unwrap();
        let tokens = SyntaxTokens::resolve(&rules);

        let root = parse(
            "<p><strong>b</strong></p><ul><li>item</li></ul><h1>A</h1><h1>B</h1>",
        )
        .unwrap();
        let markup = convert_document(&root, &tokens);

        assert!(markup.contains("**b**"));
        assert!(markup.contains("- item<br>"));
        // Empty blocks built from the custom tokens are still removed.
        assert!(!markup.contains("[table]"));
    }

    #[test]
    fn test_no_null_token_reaches_output() {
        // A rule set full of malformed values still converts through the
        // documented defaults.
        let rules = RuleSet::from_json(
            r#"{"rules": [
                {"name": "Heading Levels", "syntax": 1},
                {"name": "Bullets", "syntax": null},
                {"name": "Create a Table", "syntax": [false]}
            ]}"#,
        )
        .unwrap();
        let tokens = SyntaxTokens::resolve(&rules);
        let root = parse("<h1>T</h1><p>x</p><ul><li>i</li></ul>").unwrap();
        let markup = convert_document(&root, &tokens);

        assert!(markup.contains("=T="));
        assert!(markup.contains("* i<br>"));
    }
}
