//! Render error types.

use canonmd_ast::AstError;

/// Error that aborts a render pass.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing to the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building the document tree failed.
    #[error("document tree error: {0}")]
    Tree(#[from] AstError),
}
