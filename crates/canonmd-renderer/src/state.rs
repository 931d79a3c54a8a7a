//! Mutable state of a single render pass.

use crate::options::INDENT_STEP;
use crate::sink::Mark;

/// Indentation, list nesting and the open paragraph of one render pass.
#[derive(Debug, Default)]
pub(crate) struct RenderState {
    /// Left margin in columns.
    indent: usize,
    /// Number of enclosing lists.
    list_level: usize,
    /// Start of the paragraph being buffered, if any.
    paragraph_start: Option<Mark>,
    /// Diagnostics for malformed input that was tolerated.
    warnings: Vec<String>,
}

impl RenderState {
    pub(crate) fn indent(&self) -> usize {
        self.indent
    }

    pub(crate) fn list_level(&self) -> usize {
        self.list_level
    }

    pub(crate) fn enter_list(&mut self) {
        self.indent += INDENT_STEP;
        self.list_level += 1;
    }

    /// Leave a list. Indentation is clamped at zero when exits outnumber
    /// enters, and a warning is recorded.
    pub(crate) fn exit_list(&mut self) {
        if self.indent < INDENT_STEP || self.list_level == 0 {
            tracing::warn!(
                indent = self.indent,
                list_level = self.list_level,
                "List exit without matching enter, clamping indentation"
            );
            self.warnings.push(format!(
                "unbalanced list exit at indent {}, clamped to zero",
                self.indent
            ));
        }
        self.indent = self.indent.saturating_sub(INDENT_STEP);
        self.list_level = self.list_level.saturating_sub(1);
    }

    /// Leading spaces before a list item marker.
    pub(crate) fn marker_indent(&self) -> usize {
        self.indent.saturating_sub(INDENT_STEP)
    }

    /// Width available to paragraph text at the current indentation.
    pub(crate) fn wrap_width(&self, text_width: usize) -> usize {
        text_width.saturating_sub(self.indent).max(1)
    }

    pub(crate) fn open_paragraph(&mut self, start: Option<Mark>) {
        self.paragraph_start = start;
    }

    pub(crate) fn close_paragraph(&mut self) -> Option<Mark> {
        self.paragraph_start.take()
    }

    pub(crate) fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}
