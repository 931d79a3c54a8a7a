//! Status lines on stderr.

use console::{Style, Term};

/// Writes status lines to stderr so formatted markdown on stdout stays
/// clean. Styling is dropped when stderr is not a terminal.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(Style::new(), msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(Style::new().green(), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(Style::new().yellow(), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Style::new().red().bold(), msg);
    }

    fn line(&self, style: Style, msg: &str) {
        // Write errors on stderr are ignored.
        let _ = self
            .term
            .write_line(&style.for_stderr().apply_to(msg).to_string());
    }
}
