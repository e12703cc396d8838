//! Terminal output for sidenav commands.
//!
//! Results (JSON) go to stdout so they can be piped; status lines go to
//! stderr.

use console::{Style, Term};
use sidenav_sidebars::SidebarPath;

use crate::error::CliError;

/// Terminal output formatter.
pub(crate) struct Output {
    out: Term,
    err: Term,
    bold: Style,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            bold: Style::new().cyan().bold(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Write a JSON document to stdout.
    pub(crate) fn json(&self, value: &serde_json::Value, compact: bool) -> Result<(), CliError> {
        let rendered = if compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        self.out.write_line(&rendered)?;
        Ok(())
    }

    /// Print where sidebar definitions come from.
    pub(crate) fn sidebar_source(&self, path: &SidebarPath) {
        let source = match path {
            SidebarPath::Default => "autogenerated".to_owned(),
            SidebarPath::Disabled => "disabled".to_owned(),
            SidebarPath::File(file) => file.display().to_string(),
        };
        let line = format!("Sidebars: {source}");
        let _ = self.err.write_line(&self.bold.apply_to(line).to_string());
    }

    /// Print one named entry of a summary.
    pub(crate) fn entry(&self, name: &str, detail: &str) {
        let _ = self.err.write_line(&format!("  {name}: {detail}"));
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
