//! CLI error types.

use canonmd_config::ConfigError;
use canonmd_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{name}: no canonical form for {kinds}; file left unchanged")]
    Lossy { name: String, kinds: String },

    #[error("{count} file(s) not in canonical form")]
    Unformatted { count: usize },

    #[error("{0}")]
    Validation(String),
}
