//! CLI error types.

use ww_dom::ParseError;
use ww_rules::RulesError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Rules(#[from] RulesError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
