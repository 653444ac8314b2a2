//! Status lines printed to stderr.
//!
//! Each line starts with a right-aligned label, in the style of
//! `  Compiled admonitions.mo`.

use std::fmt::Display;

use console::{Style, Term};

/// Width the status labels are padded to.
const LABEL_WIDTH: usize = 10;

/// Writes labelled status lines for `folio` commands.
pub(crate) struct Output {
    term: Term,
    label: Style,
    done: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().cyan().bold(),
            done: Style::new().green().bold(),
            warn: Style::new().yellow().bold(),
            fail: Style::new().red().bold(),
        }
    }

    fn line(&self, style: &Style, label: &str, message: impl Display) {
        let _ = self
            .term
            .write_line(&format!("{} {message}", style.apply_to(pad_label(label))));
    }

    /// A resolved input or output location.
    pub(crate) fn path(&self, label: &str, path: &std::path::Path) {
        self.line(&self.label, label, path.display());
    }

    /// One catalog written to disk.
    pub(crate) fn compiled(&self, domain: &str) {
        self.line(&self.done, "Compiled", format_args!("{domain}.mo"));
    }

    /// One catalog that could not be compiled.
    pub(crate) fn failed(&self, domain: &str) {
        self.line(&self.fail, "Failed", format_args!("{domain}.po"));
    }

    /// Final line of a successful command.
    pub(crate) fn finished(&self, message: impl Display) {
        self.line(&self.done, "Finished", message);
    }

    pub(crate) fn warning(&self, message: impl Display) {
        self.line(&self.warn, "Warning", message);
    }

    pub(crate) fn error(&self, message: impl Display) {
        self.line(&self.fail, "Error", message);
    }
}

fn pad_label(label: &str) -> String {
    format!("{label:>LABEL_WIDTH$}")
}
