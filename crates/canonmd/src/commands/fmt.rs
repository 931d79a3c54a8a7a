//! `canonmd fmt` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use canonmd_renderer::MarkdownRenderer;
use clap::Args;

use super::{FormatOptions, ensure_lossless, format_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the fmt command.
#[derive(Args)]
pub(crate) struct FmtArgs {
    /// Markdown files to format (default: read stdin).
    files: Vec<PathBuf>,

    /// Rewrite files in place instead of printing to stdout.
    #[arg(long)]
    write: bool,

    #[command(flatten)]
    pub format: FormatOptions,
}

impl FmtArgs {
    /// Execute the fmt command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a file cannot be read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if self.write && self.files.is_empty() {
            return Err(CliError::Validation(
                "--write requires at least one file".to_owned(),
            ));
        }

        let mut renderer = self.format.renderer()?;

        if self.files.is_empty() {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            print_formatted(&mut renderer, "<stdin>", &source, &output)?;
            return Ok(());
        }

        if !self.write {
            for path in &self.files {
                let source = std::fs::read_to_string(path)?;
                print_formatted(&mut renderer, &path.display().to_string(), &source, &output)?;
            }
            return Ok(());
        }

        let mut changed = 0;
        let mut refused = 0;
        for path in &self.files {
            match rewrite_file(&mut renderer, path, &output) {
                Ok(true) => {
                    changed += 1;
                    output.info(&format!("Formatted {}", path.display()));
                }
                Ok(false) => {}
                Err(err @ CliError::Lossy { .. }) => {
                    refused += 1;
                    output.warning(&err.to_string());
                }
                Err(err) => return Err(err),
            }
        }

        output.success(&format!(
            "{changed} of {} file(s) reformatted",
            self.files.len()
        ));
        if refused > 0 {
            return Err(CliError::Validation(format!(
                "{refused} file(s) left unchanged to avoid losing content"
            )));
        }
        Ok(())
    }
}

/// Print the canonical form to stdout, warning about dropped markup.
fn print_formatted(
    renderer: &mut MarkdownRenderer,
    name: &str,
    source: &str,
    output: &Output,
) -> Result<(), CliError> {
    let result = format_source(renderer, name, source, output)?;
    if let Err(err) = ensure_lossless(name, &result) {
        output.warning(&err.to_string());
    }
    std::io::stdout().write_all(result.markdown.as_bytes())?;
    Ok(())
}

/// Rewrite `path` in canonical form. Returns whether the file changed.
///
/// Files whose rendering would drop markup are never written.
fn rewrite_file(
    renderer: &mut MarkdownRenderer,
    path: &Path,
    output: &Output,
) -> Result<bool, CliError> {
    let source = std::fs::read_to_string(path)?;
    let name = path.display().to_string();
    let result = format_source(renderer, &name, &source, output)?;
    ensure_lossless(&name, &result)?;
    if result.markdown == source {
        return Ok(false);
    }
    std::fs::write(path, result.markdown)?;
    tracing::info!(path = %path.display(), "Rewrote file");
    Ok(true)
}
