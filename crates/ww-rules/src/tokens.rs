//! Resolved syntax tokens with documented defaults.

use crate::{RuleSet, RuleSyntax};

/// Rule names the converter consults.
const HEADING_LEVELS: &str = "Heading Levels";
const CREATE_A_TABLE: &str = "Create a Table";
const BOLD_AND_ITALICS: &str = "Bold and Italics";
const BULLETS: &str = "Bullets";
const NUMBERING: &str = "Numbering";
const CATEGORY: &str = "At the End of Each New Page Provide Category";
const COLOR_A_TEXT: &str = "Color a Text";
const IMAGES: &str = "Images";

const DEFAULT_HEADING_MARKER: &str = "=";
const DEFAULT_TABLE_START: &str = r#"{| class="wikitable""#;
const DEFAULT_TABLE_END: &str = "|}";
const DEFAULT_TABLE_COLUMN: &str = "||";
const DEFAULT_BOLD: &str = "'''";
const DEFAULT_ITALIC: &str = "''";
const DEFAULT_BULLET: &str = "*";
const DEFAULT_NUMBERING: &str = "#";
const DEFAULT_CATEGORY: &str = "[[Category: <category name>]]";
const DEFAULT_COLOR_SPAN: &str = r##"<span style="color:#000080">"##;

/// Fully resolved syntax tokens for one conversion.
///
/// Resolved once from a [`RuleSet`] and threaded through the converter, so
/// no token consulted during emission is ever absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTokens {
    /// Heading marker, repeated once per heading level on both sides.
    pub heading_marker: String,
    /// Table block opening token.
    pub table_start: String,
    /// Table block closing token.
    pub table_end: String,
    /// Table column separator token.
    pub table_column: String,
    /// Bold marker.
    pub bold: String,
    /// Italic marker.
    pub italic: String,
    /// Unordered list bullet token.
    pub bullet: String,
    /// Ordered list numbering token.
    pub numbering: String,
    /// Page category token.
    pub category: String,
    /// Colored text span template.
    pub color_span: String,
    /// Image block opening token.
    pub image_start: String,
    /// Image block closing token.
    pub image_end: String,
}

impl SyntaxTokens {
    /// Resolve all tokens from a rule set, substituting the documented
    /// default for every missing or malformed rule.
    #[must_use]
    pub fn resolve(rules: &RuleSet) -> Self {
        let table = rules.resolve(CREATE_A_TABLE).and_then(RuleSyntax::as_block);
        let emphasis = rules
            .resolve(BOLD_AND_ITALICS)
            .and_then(RuleSyntax::as_block);
        let images = rules.resolve(IMAGES).and_then(RuleSyntax::as_block);

        let table_start = table
            .and_then(|block| block.start.clone())
            .unwrap_or_else(|| DEFAULT_TABLE_START.to_owned());
        let table_end = table
            .and_then(|block| block.end.clone())
            .unwrap_or_else(|| DEFAULT_TABLE_END.to_owned());

        Self {
            heading_marker: resolve_text(rules, HEADING_LEVELS, DEFAULT_HEADING_MARKER),
            table_column: table
                .and_then(|block| block.column.clone())
                .unwrap_or_else(|| DEFAULT_TABLE_COLUMN.to_owned()),
            bold: emphasis
                .and_then(|block| block.bold.clone())
                .unwrap_or_else(|| DEFAULT_BOLD.to_owned()),
            italic: emphasis
                .and_then(|block| block.italic.clone())
                .unwrap_or_else(|| DEFAULT_ITALIC.to_owned()),
            bullet: resolve_text(rules, BULLETS, DEFAULT_BULLET),
            numbering: resolve_text(rules, NUMBERING, DEFAULT_NUMBERING),
            category: resolve_text(rules, CATEGORY, DEFAULT_CATEGORY),
            color_span: resolve_text(rules, COLOR_A_TEXT, DEFAULT_COLOR_SPAN),
            // Image blocks fall back to the table block tokens, so a rule
            // set that only customizes tables still wraps images coherently.
            image_start: images
                .and_then(|block| block.start.clone())
                .unwrap_or_else(|| table_start.clone()),
            image_end: images
                .and_then(|block| block.end.clone())
                .unwrap_or_else(|| table_end.clone()),
            table_start,
            table_end,
        }
    }
}

impl Default for SyntaxTokens {
    fn default() -> Self {
        Self::resolve(&RuleSet::empty())
    }
}

fn resolve_text(rules: &RuleSet, name: &str, default: &str) -> String {
    rules
        .resolve(name)
        .and_then(RuleSyntax::as_text)
        .unwrap_or(default)
        .to_owned()
}
