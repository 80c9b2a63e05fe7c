//! Settings schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::diagnostics::DEFAULT_STDIN_SENTINEL;

/// Arguments that make the checker read the document from stdin and print JSON.
pub const DEFAULT_CHECKER_ARGS: &[&str] = &["check-contents", "--show-all-errors", "--json"];

/// How to invoke the checker.
///
/// Every field is optional in YAML; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    /// Checker executable, a bare name resolved on `PATH` or a path.
    pub flow_path: PathBuf,

    /// Arguments passed before the document is written to stdin.
    pub args: Vec<String>,

    /// Path the checker reports for stdin content.
    pub stdin_sentinel: String,

    /// Kill the checker after this many seconds (no limit when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            flow_path: PathBuf::from("flow"),
            args: DEFAULT_CHECKER_ARGS.iter().map(|a| a.to_string()).collect(),
            stdin_sentinel: DEFAULT_STDIN_SENTINEL.to_string(),
            timeout_secs: None,
        }
    }
}

impl FlowSettings {
    /// Deadline for a single check, if any. Zero means no deadline.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Apply command-line overrides on top of file settings.
    pub fn with_overrides(mut self, flow_path: Option<PathBuf>, timeout_secs: Option<u64>) -> Self {
        if let Some(path) = flow_path {
            self.flow_path = path;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_invoke_check_contents() {
        let settings = FlowSettings::default();
        assert_eq!(settings.flow_path, PathBuf::from("flow"));
        assert_eq!(
            settings.args,
            vec!["check-contents", "--show-all-errors", "--json"]
        );
        assert_eq!(settings.stdin_sentinel, "-");
        assert!(settings.timeout().is_none());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let settings: FlowSettings =
            serde_yaml::from_str("flow_path: node_modules/.bin/flow").unwrap();
        assert_eq!(settings.flow_path, PathBuf::from("node_modules/.bin/flow"));
        assert_eq!(settings.args.len(), 3);
        assert_eq!(settings.stdin_sentinel, "-");
    }

    #[test]
    fn zero_timeout_means_no_deadline() {
        let settings = FlowSettings {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(settings.timeout().is_none());

        let settings = FlowSettings {
            timeout_secs: Some(15),
            ..Default::default()
        };
        assert_eq!(settings.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let base = FlowSettings {
            timeout_secs: Some(10),
            ..Default::default()
        };

        let unchanged = base.clone().with_overrides(None, None);
        assert_eq!(unchanged, base);

        let changed = base.with_overrides(Some(PathBuf::from("/usr/bin/flow")), Some(3));
        assert_eq!(changed.flow_path, PathBuf::from("/usr/bin/flow"));
        assert_eq!(changed.timeout_secs, Some(3));
    }

    #[test]
    fn timeout_is_omitted_when_unset() {
        let yaml = serde_yaml::to_string(&FlowSettings::default()).unwrap();
        assert!(!yaml.contains("timeout_secs"));
        assert!(yaml.contains("flow_path: flow"));
    }
}
