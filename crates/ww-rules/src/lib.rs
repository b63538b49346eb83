//! Formatting rule sets for wiki markup conversion.
//!
//! Parses the JSON rules document supplied by the publishing team and
//! resolves named rules to concrete syntax tokens. A missing or oddly
//! shaped rule is never an error; every token has a documented default.
//! Only a structurally invalid document (no array of named rules) is
//! surfaced to the caller.

mod tokens;

pub use tokens::SyntaxTokens;

use std::path::Path;

use serde::Deserialize;

/// Error loading a rules document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RulesError {
    /// I/O error reading the rules file.
    #[error("failed to read rules file")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON, or its `rules` member is not an
    /// array of named rules.
    #[error("invalid rules document: {0}")]
    Structure(#[from] serde_json::Error),
}

/// An ordered collection of named formatting rules.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSet {
    /// Rules in document order.
    pub rules: Vec<Rule>,
}

/// A single named formatting rule.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Unique human-readable rule name.
    pub name: String,
    /// Target-markup syntax for the rule.
    pub syntax: RuleSyntax,
}

/// Syntax value of a rule.
///
/// Rule files mix plain token strings with structured objects carrying
/// per-part tokens. Anything else is retained as [`RuleSyntax::Other`] and
/// treated as absent at resolution time, so a malformed rule degrades to
/// its default instead of failing the whole document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleSyntax {
    /// A plain syntax token.
    Text(String),
    /// A structured syntax with optional per-part tokens.
    Block(BlockSyntax),
    /// An unrecognized syntax shape.
    Other(serde_json::Value),
}

impl RuleSyntax {
    /// The plain token string, if this rule carries one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Block(_) | Self::Other(_) => None,
        }
    }

    /// The structured syntax, if this rule carries one.
    #[must_use]
    pub fn as_block(&self) -> Option<&BlockSyntax> {
        match self {
            Self::Block(block) => Some(block),
            Self::Text(_) | Self::Other(_) => None,
        }
    }
}

/// Structured rule syntax with optional per-part tokens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockSyntax {
    /// Block opening token.
    pub start: Option<String>,
    /// Block closing token.
    pub end: Option<String>,
    /// Column separator token.
    pub column: Option<String>,
    /// Bold marker.
    pub bold: Option<String>,
    /// Italic marker.
    pub italic: Option<String>,
}

impl RuleSet {
    /// Parse a rules document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Structure`] when the document is not valid
    /// JSON or `rules` is not an array of named rules.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a rules document from a file.
    pub fn from_path(path: &Path) -> Result<Self, RulesError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Look up a rule by exact name.
    ///
    /// Absence is a normal condition; callers substitute the documented
    /// default for the token in question.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&RuleSyntax> {
        self.rules
            .iter()
            .find(|rule| rule.name == name)
            .map(|rule| &rule.syntax)
    }

    /// An empty rule set, resolving every token to its default.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_exact_name() {
        let rules = RuleSet::from_json(
            r#"{"rules": [{"name": "Bullets", "syntax": "-"}]}"#,
        )
        .unwrap();

        let syntax = rules.resolve("Bullets").unwrap();
        assert_eq!(syntax.as_text(), Some("-"));
        assert!(rules.resolve("bullets").is_none());
        assert!(rules.resolve("Numbering").is_none());
    }

    #[test]
    fn test_structured_syntax() {
        let rules = RuleSet::from_json(
            r#"{"rules": [{"name": "Create a Table", "syntax": {"start": "{|", "end": "|}"}}]}"#,
        )
        .unwrap();

        let block = rules.resolve("Create a Table").unwrap().as_block().unwrap();
        assert_eq!(block.start.as_deref(), Some("{|"));
        assert_eq!(block.end.as_deref(), Some("|}"));
        assert_eq!(block.column, None);
    }

    #[test]
    fn test_malformed_syntax_is_retained_not_fatal() {
        let rules = RuleSet::from_json(
            r#"{"rules": [{"name": "Bullets", "syntax": 42}]}"#,
        )
        .unwrap();

        let syntax = rules.resolve("Bullets").unwrap();
        assert!(syntax.as_text().is_none());
        assert!(syntax.as_block().is_none());
    }

    #[test]
    fn test_rules_member_must_be_array() {
        let err = RuleSet::from_json(r#"{"rules": "nope"}"#).unwrap_err();
        assert!(matches!(err, RulesError::Structure(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(
            &path,
            r#"{"rules": [{"name": "Numbering", "syntax": "#"}]}"#,
        )
        .unwrap();

        let rules = RuleSet::from_path(&path).unwrap();
        assert_eq!(rules.rules.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = RuleSet::from_path(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(matches!(err, RulesError::Io(_)));
    }
}
