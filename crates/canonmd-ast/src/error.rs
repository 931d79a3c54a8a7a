//! Error types for tree construction.

/// Error raised while building a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    /// `close` was called with no open node besides the root.
    #[error("close called without a matching open")]
    UnbalancedClose,

    /// `finish` was called while nodes were still open.
    #[error("{0} node(s) still open when finishing the document")]
    Unclosed(usize),
}
