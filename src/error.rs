//! Error types for flowtc operations.
//!
//! This module defines [`FlowError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `FlowError` for pipeline failures that callers classify and log
//! - Use `anyhow::Error` (via `FlowError::Other`) for unexpected errors
//! - No failure in the check pipeline is fatal: [`crate::checker::TypeChecker::check`]
//!   degrades every variant to "no diagnostics" after logging it

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for flowtc operations.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The checker executable does not exist.
    #[error("Checker executable not found: {path}")]
    ExecutableNotFound { path: PathBuf },

    /// The checker executable exists but cannot be executed.
    #[error("Checker executable is not executable: {path}")]
    NotExecutable { path: PathBuf },

    /// The checker process could not be started.
    #[error("Failed to start checker '{path}': {source}")]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing one of the checker's standard streams failed.
    #[error("I/O error on checker {stream}: {source}")]
    StreamIo {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A stream-draining task died before reaching end-of-stream.
    #[error("Interrupted while waiting for checker: {message}")]
    Interrupted { message: String },

    /// The checker did not finish before the deadline and was killed.
    #[error("Checker timed out after {secs}s and was terminated")]
    TimedOut { secs: u64 },

    /// The checker produced no output.
    #[error("Checker produced no output")]
    EmptyOutput,

    /// The checker output is not a valid response.
    #[error("Malformed checker response: {message}")]
    MalformedResponse { message: String, raw: String },

    /// The checker reported failure without listing any errors.
    #[error("Checker reported failure without errors")]
    InconsistentResponse,

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a [`FlowError`], used for logging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Executable missing, spawn error, stream I/O, interruption or timeout.
    Process,
    /// The checker printed nothing.
    EmptyOutput,
    /// Output was not a valid response.
    MalformedResponse,
    /// `passed: false` without an `errors` list.
    InconsistentResponse,
    /// Settings could not be loaded.
    Config,
    /// Anything else.
    Other,
}

impl FlowError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ExecutableNotFound { .. }
            | Self::NotExecutable { .. }
            | Self::SpawnFailed { .. }
            | Self::StreamIo { .. }
            | Self::Interrupted { .. }
            | Self::TimedOut { .. } => FailureKind::Process,
            Self::EmptyOutput => FailureKind::EmptyOutput,
            Self::MalformedResponse { .. } => FailureKind::MalformedResponse,
            Self::InconsistentResponse => FailureKind::InconsistentResponse,
            Self::ConfigNotFound { .. } | Self::ConfigParseError { .. } => FailureKind::Config,
            Self::Io(_) | Self::Other(_) => FailureKind::Other,
        }
    }

    /// Raw checker output retained for diagnosability, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Result type alias for flowtc operations.
pub type Result<T> = std::result::Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executable_not_found_displays_path() {
        let err = FlowError::ExecutableNotFound {
            path: PathBuf::from("/opt/flow/bin/flow"),
        };
        assert!(err.to_string().contains("/opt/flow/bin/flow"));
        assert_eq!(err.kind(), FailureKind::Process);
    }

    #[test]
    fn stream_io_names_the_stream() {
        let err = FlowError::StreamIo {
            stream: "stdin",
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        };
        let msg = err.to_string();
        assert!(msg.contains("stdin"));
        assert!(msg.contains("pipe closed"));
    }

    #[test]
    fn timed_out_displays_seconds() {
        let err = FlowError::TimedOut { secs: 30 };
        assert!(err.to_string().contains("30s"));
        assert_eq!(err.kind(), FailureKind::Process);
    }

    #[test]
    fn malformed_response_keeps_raw_text() {
        let err = FlowError::MalformedResponse {
            message: "expected value at line 1 column 1".into(),
            raw: "Launching Flow server...".into(),
        };
        assert_eq!(err.raw_output(), Some("Launching Flow server..."));
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
        assert!(!err.to_string().contains("Launching"));
    }

    #[test]
    fn empty_and_inconsistent_are_distinct_kinds() {
        assert_eq!(FlowError::EmptyOutput.kind(), FailureKind::EmptyOutput);
        assert_eq!(
            FlowError::InconsistentResponse.kind(),
            FailureKind::InconsistentResponse
        );
        assert!(FlowError::EmptyOutput.raw_output().is_none());
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = FlowError::ConfigParseError {
            path: PathBuf::from("/project/.flowtc/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/project/.flowtc/config.yml"));
        assert!(msg.contains("invalid syntax"));
        assert_eq!(err.kind(), FailureKind::Config);
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FlowError = io_err.into();
        assert!(matches!(err, FlowError::Io(_)));
        assert_eq!(err.kind(), FailureKind::Other);
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(FlowError::EmptyOutput)
        }
        assert!(returns_error().is_err());
    }
}
