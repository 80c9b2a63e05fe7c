//! Human-readable output formatter.
//!
//! Formats diagnostics for terminal display with optional color support.

use super::{DiagnosticFormatter, Report};
use crate::diagnostics::{Diagnostic, Severity};
use console::Style;
use std::io::Write;

/// Formats check output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.use_color {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn severity_label(&self, severity: Severity) -> String {
        let style = match severity {
            Severity::Error => Style::new().red().bold(),
            Severity::Warning => Style::new().yellow().bold(),
        };
        self.paint(style, severity.as_str())
    }

    fn write_snippet<W: Write>(
        &self,
        report: &Report<'_>,
        diag: &Diagnostic,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let Some((line, col)) = report.document.position(diag.range.start) else {
            return Ok(());
        };
        let Some(text) = report.document.line_text(line) else {
            return Ok(());
        };

        let line_len = text.chars().count();
        let underline = diag.range.len().min(line_len.saturating_sub(col)).max(1);
        let gutter = (line + 1).to_string();
        let pad = " ".repeat(gutter.len());
        let bar = self.paint(Style::new().dim(), "|");

        writeln!(writer, " {} {}", pad, bar)?;
        writeln!(writer, " {} {} {}", gutter, bar, text.trim_end_matches('\r'))?;
        writeln!(
            writer,
            " {} {} {}{}",
            pad,
            bar,
            " ".repeat(col),
            self.paint(Style::new().red(), &"^".repeat(underline))
        )?;
        Ok(())
    }
}

impl DiagnosticFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()> {
        for diag in report.diagnostics {
            writeln!(
                writer,
                "{}: {}",
                self.severity_label(diag.severity),
                diag.message
            )?;

            let (line, col) = report.line_col(diag.range.start);
            writeln!(writer, "  --> {}:{}:{}", report.file.display(), line, col)?;
            self.write_snippet(report, diag, writer)?;
            writeln!(writer)?;
        }

        let errors = report.count(Severity::Error);
        let warnings = report.count(Severity::Warning);
        if errors > 0 || warnings > 0 {
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                errors, warnings
            )?;
        }

        Ok(())
    }
}
