//! The check pipeline: run the checker, decode its output, map its errors.

use std::time::Duration;

use super::request::CheckRequest;
use crate::config::FlowSettings;
use crate::diagnostics::{Diagnostic, DiagnosticMapper, Document, LineIndex};
use crate::error::{FailureKind, FlowError, Result};
use crate::process::{self, ProcessOutput};
use crate::response::{decode, DecodedResponse};

/// Result of a completed check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Diagnostics located in the checked document.
    pub diagnostics: Vec<Diagnostic>,

    /// The checker's own verdict, which may be `false` with no diagnostics
    /// when every error belongs to another file.
    pub passed: bool,

    /// Checker exit code, informational only.
    pub exit_code: Option<i32>,

    /// Time spent in the checker process.
    pub duration: Duration,
}

/// Runs checks with one set of settings. Holds no per-check state.
#[derive(Debug, Clone, Default)]
pub struct TypeChecker {
    settings: FlowSettings,
}

impl TypeChecker {
    /// Create a checker from settings.
    pub fn new(settings: FlowSettings) -> Self {
        Self { settings }
    }

    /// The settings in use.
    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Check a document, degrading every failure to "no diagnostics".
    ///
    /// Failures are logged by kind; nothing is propagated to the caller.
    pub fn check(&self, request: &CheckRequest) -> Vec<Diagnostic> {
        let document = Document::new(request.document_text());
        self.check_with_index(request, &document)
    }

    /// Check a document, returning the classified failure if there is one.
    ///
    /// Ranges are in characters of the request's text.
    pub fn try_check(&self, request: &CheckRequest) -> Result<CheckOutcome> {
        let document = Document::new(request.document_text());
        self.try_check_with_index(request, &document)
    }

    /// Like [`check`](Self::check), with offsets computed by the host's own
    /// line index (for example one counting UTF-16 units).
    pub fn check_with_index(
        &self,
        request: &CheckRequest,
        index: &dyn LineIndex,
    ) -> Vec<Diagnostic> {
        match self.try_check_with_index(request, index) {
            Ok(outcome) => outcome.diagnostics,
            Err(e) => {
                log_failure(request, &e);
                Vec::new()
            }
        }
    }

    /// Like [`try_check`](Self::try_check), with offsets from `index`.
    pub fn try_check_with_index(
        &self,
        request: &CheckRequest,
        index: &dyn LineIndex,
    ) -> Result<CheckOutcome> {
        tracing::info!("running Flow check for {}", request.file_path().display());

        let output = self.run_checker(request)?;
        tracing::debug!("checker exit code {:?}", output.exit_code);

        let decoded = decode(&output.stdout)?;
        let passed = matches!(decoded, DecodedResponse::Passed);
        let diagnostics = self.map_errors(&decoded, request, index);

        tracing::info!(
            "Flow check for {} produced {} diagnostic(s)",
            request.file_path().display(),
            diagnostics.len()
        );

        Ok(CheckOutcome {
            diagnostics,
            passed,
            exit_code: output.exit_code,
            duration: output.duration,
        })
    }

    /// Decode raw checker output and map it onto the request's document.
    pub fn translate(&self, raw_output: &str, request: &CheckRequest) -> Result<Vec<Diagnostic>> {
        let document = Document::new(request.document_text());
        self.translate_with_index(raw_output, request, &document)
    }

    /// Like [`translate`](Self::translate), with offsets from `index`.
    pub fn translate_with_index(
        &self,
        raw_output: &str,
        request: &CheckRequest,
        index: &dyn LineIndex,
    ) -> Result<Vec<Diagnostic>> {
        let decoded = decode(raw_output)?;
        Ok(self.map_errors(&decoded, request, index))
    }

    fn run_checker(&self, request: &CheckRequest) -> Result<ProcessOutput> {
        let executable = &self.settings.flow_path;
        let args = &self.settings.args;
        let cwd = request.working_directory();
        let text = request.document_text();

        match self.settings.timeout() {
            Some(timeout) => process::run_with_deadline(executable, args, cwd, text, timeout),
            None => process::run(executable, args, cwd, text),
        }
    }

    fn map_errors(
        &self,
        decoded: &DecodedResponse,
        request: &CheckRequest,
        index: &dyn LineIndex,
    ) -> Vec<Diagnostic> {
        let errors = decoded.errors();
        if errors.is_empty() {
            return Vec::new();
        }
        DiagnosticMapper::with_sentinel(request.target_path(), &self.settings.stdin_sentinel)
            .map(errors, index)
    }
}

fn log_failure(request: &CheckRequest, error: &FlowError) {
    let file = request.file_path().display();
    match error.kind() {
        FailureKind::InconsistentResponse => {
            tracing::error!("checker bug while checking {}: {}", file, error);
        }
        FailureKind::MalformedResponse => {
            tracing::warn!(
                "no diagnostics for {}: {} (raw output: {:?})",
                file,
                error,
                error.raw_output().unwrap_or_default()
            );
        }
        _ => tracing::warn!("no diagnostics for {}: {}", file, error),
    }
}
