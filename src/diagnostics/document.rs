//! In-memory document text and its line index.
//!
//! The host editor owns the live text; [`LineIndex`] is the one question the
//! mapper asks of it. [`Document`] is the stand-alone implementation used by
//! the CLI and tests.

/// Translates 0-based line indices into character offsets.
pub trait LineIndex {
    /// Number of lines (a trailing `\n` opens one more, empty, line).
    fn line_count(&self) -> usize;

    /// Character offset of the first character of `line`, or `None` past the end.
    fn line_start_offset(&self, line: usize) -> Option<usize>;

    /// Total length in characters.
    fn len_chars(&self) -> usize;
}

/// A snapshot of document text with precomputed line starts.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    line_starts: Vec<usize>,
    len_chars: usize,
}

impl Document {
    /// Index `text`; lines are split on `\n`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        let mut len_chars = 0;
        for (i, ch) in text.chars().enumerate() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
            len_chars = i + 1;
        }
        Self {
            text,
            line_starts,
            len_chars,
        }
    }

    /// The full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 0-based (line, column) of a character offset, for display.
    ///
    /// Offsets equal to the document length resolve to the end of the last line.
    pub fn position(&self, offset: usize) -> Option<(usize, usize)> {
        if offset > self.len_chars {
            return None;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        Some((line, offset - self.line_starts[line]))
    }

    /// Text of a 0-based line without its trailing newline.
    pub fn line_text(&self, line: usize) -> Option<&str> {
        self.text.split('\n').nth(line)
    }
}

impl LineIndex for Document {
    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_start_offset(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    fn len_chars(&self) -> usize {
        self.len_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_has_one_line() {
        let doc = Document::new("");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line_start_offset(0), Some(0));
        assert_eq!(doc.line_start_offset(1), None);
        assert_eq!(doc.len_chars(), 0);
    }

    #[test]
    fn line_starts_follow_newlines() {
        let doc = Document::new("ab\ncde\n\nf");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line_start_offset(0), Some(0));
        assert_eq!(doc.line_start_offset(1), Some(3));
        assert_eq!(doc.line_start_offset(2), Some(7));
        assert_eq!(doc.line_start_offset(3), Some(8));
        assert_eq!(doc.len_chars(), 9);
    }

    #[test]
    fn trailing_newline_opens_empty_line() {
        let doc = Document::new("x\n");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_start_offset(1), Some(2));
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let doc = Document::new("é€\nz");
        assert_eq!(doc.line_start_offset(1), Some(3));
        assert_eq!(doc.len_chars(), 4);
    }

    #[test]
    fn crlf_keeps_carriage_return_on_previous_line() {
        let doc = Document::new("a\r\nb");
        assert_eq!(doc.line_start_offset(1), Some(3));
    }

    #[test]
    fn position_inverts_line_start() {
        let doc = Document::new("ab\ncde\nf");
        assert_eq!(doc.position(0), Some((0, 0)));
        assert_eq!(doc.position(2), Some((0, 2)));
        assert_eq!(doc.position(3), Some((1, 0)));
        assert_eq!(doc.position(5), Some((1, 2)));
        assert_eq!(doc.position(8), Some((2, 1)));
        assert_eq!(doc.position(9), None);
    }

    #[test]
    fn line_text_strips_newline() {
        let doc = Document::new("first\nsecond\n");
        assert_eq!(doc.line_text(1), Some("second"));
        assert_eq!(doc.line_text(2), Some(""));
        assert_eq!(doc.line_text(3), None);
    }
}
