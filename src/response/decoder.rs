//! Checker output decoding.

use super::schema::{RawError, RawResponse};
use crate::error::{FlowError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Longest raw-output excerpt written to the log.
const LOG_PREVIEW_CHARS: usize = 200;

/// A validated checker response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedResponse {
    /// The checker found nothing; any listed errors are ignored.
    Passed,
    /// The checker failed with these errors (possibly none touching the target file).
    Failed(Vec<RawError>),
}

impl DecodedResponse {
    /// Errors to map; empty when the check passed.
    pub fn errors(&self) -> &[RawError] {
        match self {
            Self::Passed => &[],
            Self::Failed(errors) => errors,
        }
    }
}

/// Parse raw checker output into its wire shape without semantic checks.
///
/// # Errors
///
/// Returns `EmptyOutput` for blank input and `MalformedResponse` (keeping
/// the raw text) when it is not a response object.
pub fn parse_response(raw: &str) -> Result<RawResponse> {
    parse_json(raw)
}

/// Just the verdict, with `errors` left untyped until it matters.
#[derive(Deserialize)]
struct Verdict {
    passed: bool,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

/// Parse and validate raw checker output.
///
/// `passed: true` wins regardless of what `errors` holds; the list is only
/// typed when the check failed.
///
/// # Errors
///
/// Everything [`parse_response`] returns, plus `InconsistentResponse` when
/// the checker reports failure without an `errors` list.
pub fn decode(raw: &str) -> Result<DecodedResponse> {
    let verdict: Verdict = parse_json(raw)?;

    if verdict.passed {
        return Ok(DecodedResponse::Passed);
    }

    let Some(errors) = verdict.errors else {
        return Err(FlowError::InconsistentResponse);
    };
    let errors: Vec<RawError> =
        serde_json::from_value(errors).map_err(|e| malformed(raw, e))?;
    Ok(DecodedResponse::Failed(errors))
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    if raw.trim().is_empty() {
        return Err(FlowError::EmptyOutput);
    }
    serde_json::from_str(raw).map_err(|e| malformed(raw, e))
}

fn malformed(raw: &str, error: serde_json::Error) -> FlowError {
    tracing::debug!("unparseable checker output: {}", preview(raw));
    FlowError::MalformedResponse {
        message: error.to_string(),
        raw: raw.to_string(),
    }
}

fn preview(raw: &str) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
