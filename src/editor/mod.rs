//! Thin adapter between a host editor and the check pipeline.
//!
//! A host implements [`EditorFile`] to describe the open file and
//! [`AnnotationSink`] to receive highlighted ranges. [`ExternalAnnotator`]
//! runs in three phases so hosts can split them across threads:
//!
//! - [`collect_information`](ExternalAnnotator::collect_information): snapshot
//!   path, project root and text (cheap, needs host read access)
//! - [`do_annotate`](ExternalAnnotator::do_annotate): run the checker (slow,
//!   may wait for a Flow server to start)
//! - [`apply`](ExternalAnnotator::apply): hand diagnostics to the sink
//!
//! # Example
//!
//! ```
//! use flowtc::diagnostics::{Diagnostic, Severity, TextRange};
//! use flowtc::editor::{AnnotationSink, ExternalAnnotator};
//!
//! #[derive(Default)]
//! struct Collected(Vec<(TextRange, String)>);
//!
//! impl AnnotationSink for Collected {
//!     fn annotate(&mut self, range: TextRange, message: &str, _severity: Severity) {
//!         self.0.push((range, message.to_string()));
//!     }
//! }
//!
//! let annotator = ExternalAnnotator::default();
//! let mut sink = Collected::default();
//! annotator.apply(&[Diagnostic::new(TextRange::new(0, 3), "boom")], &mut sink);
//! assert_eq!(sink.0, vec![(TextRange::new(0, 3), "boom".to_string())]);
//! ```

use std::path::PathBuf;

use crate::checker::{CheckRequest, TypeChecker};
use crate::diagnostics::{Diagnostic, LineIndex, Severity, TextRange};

/// What the host knows about the file being annotated.
pub trait EditorFile {
    /// Canonical path of the backing file, `None` for buffers without one.
    fn canonical_path(&self) -> Option<PathBuf>;

    /// Canonical path of the project root.
    fn project_root(&self) -> Option<PathBuf>;

    /// Current in-memory text, including unsaved edits.
    fn current_text(&self) -> Option<String>;

    /// The host's own line index over the current text, when its offsets
    /// are not plain characters. `None` maps in characters.
    fn line_index(&self) -> Option<&dyn LineIndex> {
        None
    }
}

/// Receives diagnostics for rendering.
pub trait AnnotationSink {
    /// Highlight `range` with `message`.
    fn annotate(&mut self, range: TextRange, message: &str, severity: Severity);
}

/// An open file snapshot, for hosts that already hold everything in memory.
#[derive(Debug, Clone)]
pub struct BufferedFile {
    pub path: PathBuf,
    pub project_root: PathBuf,
    pub text: String,
}

impl EditorFile for BufferedFile {
    fn canonical_path(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }

    fn project_root(&self) -> Option<PathBuf> {
        Some(self.project_root.clone())
    }

    fn current_text(&self) -> Option<String> {
        Some(self.text.clone())
    }
}

/// Runs Flow checks on behalf of a host editor.
#[derive(Debug, Clone, Default)]
pub struct ExternalAnnotator {
    checker: TypeChecker,
}

impl ExternalAnnotator {
    /// Create an annotator around a configured checker.
    pub fn new(checker: TypeChecker) -> Self {
        Self { checker }
    }

    /// The underlying checker.
    pub fn checker(&self) -> &TypeChecker {
        &self.checker
    }

    /// Snapshot what a check needs, or `None` if the file cannot be checked.
    pub fn collect_information(&self, file: &dyn EditorFile) -> Option<CheckRequest> {
        let Some(path) = file.canonical_path() else {
            tracing::info!("skipping Flow check: file has no path on disk");
            return None;
        };
        let Some(root) = file.project_root() else {
            tracing::info!("skipping Flow check for {}: no project root", path.display());
            return None;
        };
        let Some(text) = file.current_text() else {
            tracing::info!("skipping Flow check for {}: missing document", path.display());
            return None;
        };
        Some(CheckRequest::new(text, path, root))
    }

    /// Run the checker. Never fails; problems are logged.
    pub fn do_annotate(&self, request: &CheckRequest) -> Vec<Diagnostic> {
        self.checker.check(request)
    }

    /// Run the checker, placing ranges with the host's line index.
    pub fn do_annotate_with_index(
        &self,
        request: &CheckRequest,
        index: &dyn LineIndex,
    ) -> Vec<Diagnostic> {
        self.checker.check_with_index(request, index)
    }

    /// Hand diagnostics to the host.
    pub fn apply(&self, diagnostics: &[Diagnostic], sink: &mut dyn AnnotationSink) {
        for diagnostic in diagnostics {
            sink.annotate(diagnostic.range, &diagnostic.message, diagnostic.severity);
        }
    }

    /// All three phases in sequence. Returns the number of annotations applied.
    pub fn annotate(&self, file: &dyn EditorFile, sink: &mut dyn AnnotationSink) -> usize {
        let Some(request) = self.collect_information(file) else {
            return 0;
        };
        let diagnostics = match file.line_index() {
            Some(index) => self.do_annotate_with_index(&request, index),
            None => self.do_annotate(&request),
        };
        self.apply(&diagnostics, sink);
        diagnostics.len()
    }
}
