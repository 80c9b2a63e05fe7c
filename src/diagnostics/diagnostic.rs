//! Diagnostic values handed to the editor layer.
//!
//! This module provides the [`Diagnostic`] type: a half-open character range
//! in the current document plus the aggregated checker message.

use std::fmt;

/// A half-open character-offset range (`start..end`) in the document.
///
/// Offsets count Unicode scalar values (`char`) from the start of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextRange {
    /// Range start offset (inclusive).
    pub start: usize,
    /// Range end offset (exclusive).
    pub end: usize,
}

impl TextRange {
    /// Create a new range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    Warning,
    #[default]
    Error,
}

impl Severity {
    /// Map the checker's `level` field; anything but `"warning"` is an error.
    pub fn from_level(level: Option<&str>) -> Self {
        match level {
            Some(l) if l.eq_ignore_ascii_case("warning") => Self::Warning,
            _ => Self::Error,
        }
    }

    /// Lowercase name used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A highlighted range with its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Range in the current document.
    pub range: TextRange,
    /// Human-readable message, shared by every range of one checker error.
    pub message: String,
    /// Severity reported by the checker.
    pub severity: Severity,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Set the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}
