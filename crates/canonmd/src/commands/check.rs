//! `canonmd check` command implementation.

use std::path::{Path, PathBuf};

use canonmd_renderer::MarkdownRenderer;
use clap::Args;

use super::{FormatOptions, ensure_lossless, format_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Markdown files to check.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    pub format: FormatOptions,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Unformatted` if any file differs from its canonical form.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut renderer = self.format.renderer()?;

        let mut count = 0;
        for path in &self.files {
            match is_canonical(&mut renderer, path, &output) {
                Ok(true) => {}
                Ok(false) => {
                    output.warning(&format!("Would reformat {}", path.display()));
                    count += 1;
                }
                Err(err @ CliError::Lossy { .. }) => {
                    output.warning(&err.to_string());
                    count += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if count > 0 {
            return Err(CliError::Unformatted { count });
        }

        output.success(&format!(
            "{} file(s) already in canonical form",
            self.files.len()
        ));
        Ok(())
    }
}

/// Whether `path` is already canonical. Files whose rendering would drop
/// markup fail with `CliError::Lossy`.
fn is_canonical(
    renderer: &mut MarkdownRenderer,
    path: &Path,
    output: &Output,
) -> Result<bool, CliError> {
    let source = std::fs::read_to_string(path)?;
    let name = path.display().to_string();
    let result = format_source(renderer, &name, &source, output)?;
    ensure_lossless(&name, &result)?;
    Ok(result.markdown == source)
}
