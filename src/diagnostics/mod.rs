//! Mapping checker errors onto the live document.
//!
//! # Overview
//!
//! - **Document** - the in-memory text and its line index ([`Document`], [`LineIndex`])
//! - **Spans** - checker line/column spans and their offset conversion ([`Span`])
//! - **Mapper** - per-error filtering, message aggregation and range mapping ([`DiagnosticMapper`])
//! - **Diagnostics** - the resulting range + message values ([`Diagnostic`])
//!
//! # Example
//!
//! ```
//! use flowtc::diagnostics::{DiagnosticMapper, Document, TextRange};
//! use flowtc::response::{MessagePart, RawError};
//!
//! let document = Document::new("// @flow\nlet x: number = 'one';\n");
//! let errors = vec![RawError::new(vec![
//!     MessagePart::new("string", "/p/a.js").with_span(2, 17, 2, 21),
//!     MessagePart::new("This type is incompatible with", ""),
//!     MessagePart::new("number", "/p/a.js").with_span(2, 8, 2, 13),
//! ])];
//!
//! let diagnostics = DiagnosticMapper::new("/p/a.js").map(&errors, &document);
//! assert_eq!(diagnostics.len(), 2);
//! assert_eq!(diagnostics[0].range, TextRange::new(25, 30));
//! assert_eq!(diagnostics[0].message, "string. This type is incompatible with number");
//! ```

pub mod diagnostic;
pub mod document;
pub mod mapper;
pub mod span;

pub use diagnostic::{Diagnostic, Severity, TextRange};
pub use document::{Document, LineIndex};
pub use mapper::{aggregate_message, map_span, DiagnosticMapper, DEFAULT_STDIN_SENTINEL};
pub use span::{MappingError, Span};
