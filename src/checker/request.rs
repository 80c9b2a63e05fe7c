//! Per-check input.

use std::path::{Path, PathBuf};

/// Everything one check needs from the host editor.
///
/// Built fresh for every check and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    document_text: String,
    file_path: PathBuf,
    working_directory: PathBuf,
}

impl CheckRequest {
    /// `file_path` and `working_directory` should already be canonical.
    pub fn new(
        document_text: impl Into<String>,
        file_path: impl Into<PathBuf>,
        working_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            document_text: document_text.into(),
            file_path: file_path.into(),
            working_directory: working_directory.into(),
        }
    }

    /// Current in-memory text, which may differ from the file on disk.
    pub fn document_text(&self) -> &str {
        &self.document_text
    }

    /// Canonical path of the document.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Canonical project root the checker runs in.
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// The document path as the checker prints it.
    pub fn target_path(&self) -> String {
        self.file_path.to_string_lossy().into_owned()
    }
}
