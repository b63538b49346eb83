//! Post-emission markup cleanup.
//!
//! Block boundaries are easiest to find once flattened to tokens, so the
//! cleanup is textual: a table block whose interior holds nothing but
//! whitespace and pipes is one a heading opened and nothing filled in
//! before the next heading or the end of the document.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;
use ww_rules::SyntaxTokens;

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid blank-line regex"));

/// Removes vestigial empty table blocks and collapses blank-line runs.
///
/// Textual by design; swapping in a tree-level eliminator would only
/// touch this type.
pub struct PostProcessor {
    empty_block: Option<Regex>,
}

impl PostProcessor {
    /// Build the cleanup for the given tokens.
    ///
    /// If the delimiter tokens produce an unusable pattern, the empty
    /// block removal is disabled and markup passes through unmodified.
    #[must_use]
    pub fn new(tokens: &SyntaxTokens) -> Self {
        let pattern = format!(
            r"{}[\s|]*{}",
            regex::escape(&tokens.table_start),
            regex::escape(&tokens.table_end)
        );
        let empty_block = match Regex::new(&pattern) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                warn!("empty block cleanup disabled: {err}");
                None
            }
        };
        Self { empty_block }
    }

    /// Apply the cleanup to emitted markup.
    #[must_use]
    pub fn apply(&self, markup: &str) -> String {
        let Some(empty_block) = &self.empty_block else {
            return markup.to_owned();
        };
        let cleaned = empty_block.replace_all(markup, "");
        collapse_blank_lines(&cleaned)
    }
}

/// Collapse runs of three or more consecutive newlines to one blank line.
///
/// Idempotent; a second application changes nothing.
#[must_use]
pub fn collapse_blank_lines(markup: &str) -> String {
    BLANK_RUNS.replace_all(markup, "\n\n").into_owned()
}
