//! `ww convert` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use ww_rules::{RuleSet, SyntaxTokens};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Path to the converter-produced HTML file.
    input: PathBuf,

    /// Path to the formatting rules JSON file (default: built-in defaults).
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Name stem for standardized image names (default: input file stem).
    #[arg(long)]
    stem: Option<String>,

    /// Write markup to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules or input file cannot be read or the
    /// input cannot be parsed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let rules = match &self.rules {
            Some(path) => RuleSet::from_path(path)?,
            None => {
                output.info("No rules file given, using default syntax");
                RuleSet::empty()
            }
        };
        let tokens = SyntaxTokens::resolve(&rules);

        let html = std::fs::read_to_string(&self.input)?;
        let mut root = ww_dom::parse(&html)?;

        let headings = ww_dom::collect_headings(&root);
        if !headings.is_empty() {
            output.info(&format!("Found {} headings", headings.len()));
        }

        let stem = self
            .stem
            .clone()
            .unwrap_or_else(|| default_stem(&self.input));
        let catalog = ww_dom::stamp_image_identities(&mut root, &stem);
        if !catalog.is_empty() {
            output.info(&format!(
                "Stamped {} image identities with stem {stem}",
                catalog.len()
            ));
        }

        let markup = ww_renderer::convert_document(&root, &tokens);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &markup)?;
                output.success(&format!("Wrote markup to {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(markup.as_bytes())?;
            }
        }

        Ok(())
    }
}

/// The image name stem when none is given: the input file's own stem.
fn default_stem(input: &Path) -> String {
    input
        .file_stem()
        .map_or_else(|| "Document".to_owned(), |stem| {
            stem.to_string_lossy().into_owned()
        })
}
