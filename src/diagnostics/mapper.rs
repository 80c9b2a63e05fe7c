//! Translation of checker errors into document diagnostics.
//!
//! For each checker error the mapper:
//!
//! 1. skips errors with no message parts
//! 2. skips errors whose primary part belongs to another file
//! 3. joins every part's description into one message
//! 4. emits one diagnostic per part located in the target document
//!
//! A part whose span cannot be placed in the document is dropped on its own;
//! its siblings and the remaining errors are still mapped.

use super::diagnostic::{Diagnostic, Severity, TextRange};
use super::document::LineIndex;
use super::span::{MappingError, Span};
use crate::response::{MessagePart, RawError};

/// Path the checker reports for content read from stdin.
pub const DEFAULT_STDIN_SENTINEL: &str = "-";

/// Maps checker errors onto one target document.
///
/// Holds only the target path and sentinel; mapping is a pure function of
/// its inputs.
#[derive(Debug, Clone)]
pub struct DiagnosticMapper {
    target_path: String,
    sentinel: String,
}

impl DiagnosticMapper {
    /// Mapper for `target_path` using the default `"-"` sentinel.
    pub fn new(target_path: impl Into<String>) -> Self {
        Self::with_sentinel(target_path, DEFAULT_STDIN_SENTINEL)
    }

    /// Mapper for `target_path` with a custom stdin sentinel.
    pub fn with_sentinel(target_path: impl Into<String>, sentinel: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            sentinel: sentinel.into(),
        }
    }

    /// The path diagnostics are attributed to.
    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    /// Map every error; the result may be empty even for a failed check.
    pub fn map<D: LineIndex + ?Sized>(&self, errors: &[RawError], document: &D) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (index, error) in errors.iter().enumerate() {
            diagnostics.extend(self.map_error(index, error, document));
        }
        diagnostics
    }

    /// Map a single error.
    pub fn map_error<D: LineIndex + ?Sized>(
        &self,
        index: usize,
        error: &RawError,
        document: &D,
    ) -> Vec<Diagnostic> {
        let Some(first) = error.message_parts.first() else {
            tracing::warn!("skipping checker error #{}: no message parts", index);
            return Vec::new();
        };

        if first.path != self.target_path && !self.is_sentinel(&first.path) {
            tracing::debug!(
                "skipping checker error #{} reported for {}",
                index,
                first.path
            );
            return Vec::new();
        }

        let message = aggregate_message(&error.message_parts, &self.sentinel);
        let severity = Severity::from_level(error.level.as_deref());

        error
            .message_parts
            .iter()
            .filter(|part| self.is_located_here(part))
            .filter_map(|part| match map_span(part, document) {
                Ok(range) => Some(Diagnostic::new(range, message.clone()).with_severity(severity)),
                Err(e) => {
                    tracing::warn!(
                        "dropping part of checker error #{} ({:?}): {}",
                        index,
                        part.description,
                        e
                    );
                    None
                }
            })
            .collect()
    }

    fn is_sentinel(&self, path: &str) -> bool {
        path == self.sentinel
    }

    fn is_located_here(&self, part: &MessagePart) -> bool {
        !part.path.is_empty() && (part.path == self.target_path || self.is_sentinel(&part.path))
    }
}

/// Range of one message part in `index`.
pub fn map_span<D: LineIndex + ?Sized>(
    part: &MessagePart,
    index: &D,
) -> Result<TextRange, MappingError> {
    Span::from_part(part).to_range(index)
}

/// Join part descriptions into one message.
///
/// A part with no file (empty or sentinel path) starts a new sentence with
/// `". "`; a part with a file continues the previous one after a space.
pub fn aggregate_message(parts: &[MessagePart], sentinel: &str) -> String {
    let mut parts = parts.iter();
    let Some(first) = parts.next() else {
        return String::new();
    };

    let mut message = first.description.clone();
    for part in parts {
        if part.path.is_empty() || part.path == sentinel {
            message.push_str(". ");
        } else {
            message.push(' ');
        }
        message.push_str(&part.description);
    }
    message
}
