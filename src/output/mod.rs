//! Diagnostic output formatters.
//!
//! This module renders the diagnostics of one checked file as
//! human-readable text or machine-readable JSON.

pub mod human;
pub mod json;

use crate::diagnostics::{Diagnostic, Document, Severity};
use std::io::Write;
use std::path::Path;

/// Output format for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// The diagnostics of one file together with the text they point into.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    /// Path shown to the user.
    pub file: &'a Path,
    /// Document the ranges refer to.
    pub document: &'a Document,
    /// Diagnostics in checker order.
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> Report<'a> {
    /// Create a report.
    pub fn new(file: &'a Path, document: &'a Document, diagnostics: &'a [Diagnostic]) -> Self {
        Self {
            file,
            document,
            diagnostics,
        }
    }

    /// Number of diagnostics with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// 1-based (line, column) of an offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        self.document
            .position(offset)
            .map(|(line, col)| (line + 1, col + 1))
            .unwrap_or((1, 1))
    }
}

/// Trait for formatting check output.
pub trait DiagnosticFormatter {
    /// Format a report to the given writer.
    fn format<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()>;
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
