//! flowtc - Flow type-check diagnostics for editors.
//!
//! flowtc runs the Flow type checker on the in-memory text of one file,
//! decodes its JSON verdict and maps every reported line/column span onto
//! character offsets in that text, ready for an editor to highlight.
//!
//! # Modules
//!
//! - [`checker`] - The check pipeline tying the pieces together
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading and layering
//! - [`diagnostics`] - Diagnostics, documents and span mapping
//! - [`editor`] - Host editor adapter
//! - [`error`] - Error types and result aliases
//! - [`output`] - Human and JSON report formatters
//! - [`process`] - Checker subprocess execution
//! - [`response`] - Checker JSON decoding
//! - [`ui`] - Status lines, spinners and report output
//!
//! # Example
//!
//! ```
//! use flowtc::checker::{CheckRequest, TypeChecker};
//!
//! let request = CheckRequest::new(
//!     "// @flow\nconst n: number = 'x';\n",
//!     "/project/src/app.js",
//!     "/project",
//! );
//! let raw = r#"{"passed": false, "errors": [{"message": [
//!     {"descr": "string", "path": "/project/src/app.js",
//!      "line": 2, "endline": 2, "start": 19, "end": 21}
//! ]}]}"#;
//!
//! let diagnostics = TypeChecker::default().translate(raw, &request).unwrap();
//! assert_eq!(diagnostics[0].message, "string");
//! assert_eq!((diagnostics[0].range.start, diagnostics[0].range.end), (27, 30));
//! ```
//!
//! For checks that run a real checker process, see the integration tests.

pub mod checker;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod editor;
pub mod error;
pub mod output;
pub mod process;
pub mod response;
pub mod ui;

pub use error::{FlowError, Result};
