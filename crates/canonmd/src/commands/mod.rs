//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod fmt;

pub(crate) use check::CheckArgs;
pub(crate) use fmt::FmtArgs;

use std::path::PathBuf;

use canonmd_config::{CliSettings, Config, Profile};
use canonmd_renderer::{MarkdownRenderer, RenderResult};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Formatting options shared by all commands.
#[derive(Args)]
pub(crate) struct FormatOptions {
    /// Path to configuration file (default: auto-discover canonmd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wrap width in columns (overrides config).
    #[arg(long, env = "CANONMD_WIDTH")]
    width: Option<usize>,

    /// Width profile: "wide" (100) or "narrow" (80) (overrides config).
    #[arg(long, value_parser = parse_profile)]
    profile: Option<Profile>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl FormatOptions {
    /// Load configuration and build a renderer from it.
    pub(crate) fn renderer(&self) -> Result<MarkdownRenderer, CliError> {
        let cli_settings = CliSettings {
            text_width: self.width,
            profile: self.profile,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        Ok(MarkdownRenderer::new().with_options(config.renderer_options()))
    }
}

fn parse_profile(value: &str) -> Result<Profile, String> {
    match value {
        "wide" => Ok(Profile::Wide),
        "narrow" => Ok(Profile::Narrow),
        other => Err(format!("unknown profile '{other}', expected wide or narrow")),
    }
}

/// Render `source` and report tolerated malformed input.
///
/// Content without a canonical form is left to the caller: it decides
/// whether dropping that markup is acceptable.
pub(crate) fn format_source(
    renderer: &mut MarkdownRenderer,
    name: &str,
    source: &str,
    output: &Output,
) -> Result<RenderResult, CliError> {
    let result = renderer.render_markdown(source)?;
    for warning in &result.warnings {
        output.warning(&format!("{name}: {warning}"));
    }
    Ok(result)
}

/// Fail when rendering dropped markup that has no canonical form.
pub(crate) fn ensure_lossless(name: &str, result: &RenderResult) -> Result<(), CliError> {
    if result.skipped.is_empty() {
        return Ok(());
    }
    Err(CliError::Lossy {
        name: name.to_owned(),
        kinds: result.skipped.join(", "),
    })
}
