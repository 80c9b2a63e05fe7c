//! Checker source spans and their conversion to document offsets.
//!
//! The checker reports 1-based lines and 1-based inclusive columns; the
//! editor wants 0-based, half-open character ranges.

use super::diagnostic::TextRange;
use super::document::LineIndex;
use crate::response::MessagePart;
use thiserror::Error;

/// A source location span as reported by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Starting line (1-indexed).
    pub start_line: i64,
    /// Starting column (1-indexed, inclusive).
    pub start_col: i64,
    /// Ending line (1-indexed).
    pub end_line: i64,
    /// Ending column (1-indexed, inclusive).
    pub end_col: i64,
}

/// Why a span could not be placed in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("line {line} is not a valid 1-based line")]
    InvalidLine { line: i64 },

    #[error("line {line} is past the end of the document ({line_count} lines)")]
    LineOutOfRange { line: i64, line_count: usize },

    #[error("range {start}..{end} lies outside the document (length {len})")]
    OutOfBounds { start: i64, end: i64, len: usize },

    #[error("range start {start} is after its end {end}")]
    Inverted { start: i64, end: i64 },
}

impl Span {
    /// Create a span with precise positions.
    pub fn new(start_line: i64, start_col: i64, end_line: i64, end_col: i64) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// The span of a message part.
    pub fn from_part(part: &MessagePart) -> Self {
        Self::new(part.start_line, part.start_col, part.end_line, part.end_col)
    }

    /// Convert to a half-open range in `index`.
    ///
    /// `start = lineStart(startLine - 1) + startCol - 1` and
    /// `end = lineStart(endLine - 1) + endCol`. The result must satisfy
    /// `0 <= start <= end <= len`.
    pub fn to_range<D: LineIndex + ?Sized>(
        &self,
        index: &D,
    ) -> std::result::Result<TextRange, MappingError> {
        let start_line_offset = line_start(index, self.start_line)?;
        let end_line_offset = line_start(index, self.end_line)?;

        let len = index.len_chars();

        // Columns come straight from checker JSON and may be anything.
        let start = self
            .start_col
            .checked_sub(1)
            .and_then(|col| offset_plus(start_line_offset, col));
        let end = offset_plus(end_line_offset, self.end_col);
        let (Some(start), Some(end)) = (start, end) else {
            return Err(MappingError::OutOfBounds {
                start: self.start_col,
                end: self.end_col,
                len,
            });
        };

        if start > end {
            return Err(MappingError::Inverted { start, end });
        }
        match (usize::try_from(start), usize::try_from(end)) {
            (Ok(s), Ok(e)) if e <= len => Ok(TextRange::new(s, e)),
            _ => Err(MappingError::OutOfBounds { start, end, len }),
        }
    }
}

/// `line_offset + column`, or `None` on overflow.
fn offset_plus(line_offset: usize, column: i64) -> Option<i64> {
    i64::try_from(line_offset).ok()?.checked_add(column)
}

fn line_start<D: LineIndex + ?Sized>(
    index: &D,
    line: i64,
) -> std::result::Result<usize, MappingError> {
    if line < 1 {
        return Err(MappingError::InvalidLine { line });
    }
    usize::try_from(line - 1)
        .ok()
        .and_then(|zero_based| index.line_start_offset(zero_based))
        .ok_or(MappingError::LineOutOfRange {
            line,
            line_count: index.line_count(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Document;

    /// 40 characters on lines 1 and 2, so line 3 starts at offset 40.
    fn forty_char_prefix_doc() -> Document {
        let mut text = String::new();
        text.push_str(&"a".repeat(19));
        text.push('\n');
        text.push_str(&"b".repeat(19));
        text.push('\n');
        text.push_str("const value: string = 42;\n");
        Document::new(text)
    }

    #[test]
    fn maps_single_line_span() {
        let doc = forty_char_prefix_doc();
        assert_eq!(doc.line_start_offset(2), Some(40));

        let range = Span::new(3, 5, 3, 10).to_range(&doc).unwrap();
        assert_eq!(range, TextRange::new(44, 50));
    }

    #[test]
    fn maps_multi_line_span() {
        let doc = Document::new("ab\ncde\nfg");
        let range = Span::new(1, 2, 3, 1).to_range(&doc).unwrap();
        assert_eq!(range, TextRange::new(1, 8));
    }

    #[test]
    fn span_ending_at_document_end_is_valid() {
        let doc = Document::new("abc");
        let range = Span::new(1, 1, 1, 3).to_range(&doc).unwrap();
        assert_eq!(range, TextRange::new(0, 3));
    }

    #[test]
    fn line_past_end_is_out_of_range() {
        let doc = Document::new("one line");
        let err = Span::new(5, 1, 5, 2).to_range(&doc).unwrap_err();
        assert_eq!(
            err,
            MappingError::LineOutOfRange {
                line: 5,
                line_count: 1
            }
        );
    }

    #[test]
    fn zero_line_is_invalid() {
        let doc = Document::new("x");
        let err = Span::new(0, 1, 0, 0).to_range(&doc).unwrap_err();
        assert_eq!(err, MappingError::InvalidLine { line: 0 });
    }

    #[test]
    fn column_past_document_end_is_out_of_bounds() {
        let doc = Document::new("abc");
        let err = Span::new(1, 1, 1, 10).to_range(&doc).unwrap_err();
        assert!(matches!(err, MappingError::OutOfBounds { end: 10, .. }));
    }

    #[test]
    fn zero_column_at_document_start_is_out_of_bounds() {
        let doc = Document::new("abc");
        let err = Span::new(1, 0, 1, 2).to_range(&doc).unwrap_err();
        assert!(matches!(err, MappingError::OutOfBounds { start: -1, .. }));
    }

    #[test]
    fn extreme_columns_are_out_of_bounds() {
        let doc = Document::new("a\nb\n");

        let err = Span::new(2, 1, 2, i64::MAX).to_range(&doc).unwrap_err();
        assert!(matches!(err, MappingError::OutOfBounds { .. }));

        let err = Span::new(2, i64::MIN, 2, 1).to_range(&doc).unwrap_err();
        assert!(matches!(err, MappingError::OutOfBounds { .. }));

        let err = Span::new(1, i64::MIN + 1, 1, i64::MIN + 1)
            .to_range(&doc)
            .unwrap_err();
        assert!(matches!(err, MappingError::OutOfBounds { .. }));
    }

    #[test]
    fn inverted_span_is_rejected() {
        let doc = Document::new("abc\ndef");
        let err = Span::new(2, 1, 1, 1).to_range(&doc).unwrap_err();
        assert_eq!(err, MappingError::Inverted { start: 4, end: 1 });
    }

    #[test]
    fn from_part_copies_coordinates() {
        let part = MessagePart::new("x", "a.js").with_span(2, 3, 4, 5);
        assert_eq!(Span::from_part(&part), Span::new(2, 3, 4, 5));
    }
}
