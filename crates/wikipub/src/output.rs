//! Colored progress output on stderr.

use std::fmt::Display;

use console::{Term, style};

/// Progress and result lines for the terminal.
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

    fn line(&self, msg: impl Display) {
        let _ = self.term.write_line(&msg.to_string());
    }

    /// Plain line.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Green line.
    pub(crate) fn success(&self, msg: &str) {
        self.line(style(msg).green());
    }

    /// Yellow line.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(style(msg).yellow());
    }

    /// Red line.
    pub(crate) fn error(&self, msg: &str) {
        self.line(style(msg).red());
    }

    /// Bold cyan line, used for section headers.
    pub(crate) fn highlight(&self, msg: &str) {
        self.line(style(msg).cyan().bold());
    }

    /// Indented list entry.
    pub(crate) fn item(&self, msg: &str) {
        self.line(format_args!("  -> {msg}"));
    }
}
