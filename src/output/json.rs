//! JSON output formatter.
//!
//! Formats diagnostics as machine-readable JSON for tooling integration.
//! Offsets are 0-based characters; lines and columns are 1-based.

use super::{DiagnosticFormatter, Report};
use crate::diagnostics::Severity;
use serde::Serialize;
use std::io::Write;

/// Formats check output as JSON.
#[derive(Debug, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    file: String,
    diagnostics: Vec<JsonDiagnostic>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    severity: &'static str,
    message: String,
    start: usize,
    end: usize,
    line: usize,
    column: usize,
    end_line: usize,
    end_column: usize,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()> {
        let diagnostics = report
            .diagnostics
            .iter()
            .map(|d| {
                let (line, column) = report.line_col(d.range.start);
                let (end_line, end_column) = report.line_col(d.range.end);
                JsonDiagnostic {
                    severity: d.severity.as_str(),
                    message: d.message.clone(),
                    start: d.range.start,
                    end: d.range.end,
                    line,
                    column,
                    end_line,
                    end_column,
                }
            })
            .collect();

        let output = JsonOutput {
            file: report.file.display().to_string(),
            diagnostics,
            summary: JsonSummary {
                total: report.diagnostics.len(),
                errors: report.count(Severity::Error),
                warnings: report.count(Severity::Warning),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}
