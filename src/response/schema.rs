//! Wire types for the checker's `--json` output.
//!
//! Field names follow Flow's JSON: `descr`, `line`, `endline`, `start`, `end`.
//! Unknown fields such as `flowVersion` or `loc` are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level checker response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    /// Authoritative pass/fail flag.
    pub passed: bool,

    /// Reported errors; only meaningful when `passed` is false.
    #[serde(default)]
    pub errors: Option<Vec<RawError>>,
}

/// One reported error, made of ordered message parts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawError {
    /// The first part is the primary location; later parts are related ones.
    #[serde(rename = "message", default)]
    pub message_parts: Vec<MessagePart>,

    /// `"error"` or `"warning"`; absent means error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Error category such as `"infer"` or `"parse"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl RawError {
    /// Create an error from its message parts.
    pub fn new(message_parts: Vec<MessagePart>) -> Self {
        Self {
            message_parts,
            ..Default::default()
        }
    }

    /// Set the reported level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }
}

/// A (description, location) fragment of an error.
///
/// Lines and columns are 1-based and inclusive. Parts without a location
/// carry an empty path and zeroed coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessagePart {
    #[serde(rename = "descr", default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: String,

    #[serde(rename = "line", default)]
    pub start_line: i64,

    #[serde(rename = "endline", default)]
    pub end_line: i64,

    #[serde(rename = "start", default)]
    pub start_col: i64,

    #[serde(rename = "end", default)]
    pub end_col: i64,
}

impl MessagePart {
    /// Create a part with no location.
    pub fn new(description: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Attach a 1-based inclusive span.
    pub fn with_span(mut self, start_line: i64, start_col: i64, end_line: i64, end_col: i64) -> Self {
        self.start_line = start_line;
        self.start_col = start_col;
        self.end_line = end_line;
        self.end_col = end_col;
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
