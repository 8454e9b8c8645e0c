//! Colored terminal output utilities.
//!
//! Status messages go to stderr; command results go to stdout so they can
//! be piped.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    out: Term,
    err: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a line of command output.
    pub(crate) fn print(&self, line: &str) {
        let _ = self.out.write_line(line);
    }

    /// Print a line of secondary command output (dim).
    pub(crate) fn print_dim(&self, line: &str) {
        let _ = self.out.write_line(&self.dim.apply_to(line).to_string());
    }

    /// Print a heading in command output (cyan bold).
    pub(crate) fn heading(&self, line: &str) {
        let _ = self.out.write_line(&self.cyan_bold.apply_to(line).to_string());
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.err.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.err.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.err.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}
