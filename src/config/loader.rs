//! Settings file discovery and loading.
//!
//! Settings are layered; later files override earlier ones key by key:
//! 1. User global settings (`~/.flowtc/config.yml`)
//! 2. Project settings (`.flowtc/config.yml`)
//! 3. Local overrides (`.flowtc/config.local.yml`)

use crate::config::schema::FlowSettings;
use crate::error::{FlowError, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding flowtc settings, in the project root and in `$HOME`.
pub const CONFIG_DIR: &str = ".flowtc";

/// Marker file at the root of a Flow project.
pub const FLOWCONFIG: &str = ".flowconfig";

/// Settings files that exist, in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global settings: ~/.flowtc/config.yml
    pub user_global: Option<PathBuf>,

    /// Project settings: .flowtc/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .flowtc/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover settings files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: dirs::home_dir()
                .and_then(|home| existing(home.join(CONFIG_DIR).join("config.yml"))),
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

/// Find the Flow project root by walking up from `start`.
///
/// Looks for a `.flowconfig` file first, then falls back to the nearest
/// directory containing `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let flow_root = start
        .ancestors()
        .find(|dir| dir.join(FLOWCONFIG).is_file());
    if let Some(root) = flow_root {
        return Some(root.to_path_buf());
    }

    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Load one settings file as a raw YAML value.
///
/// An empty file reads as an empty mapping.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist and
/// `ConfigParseError` if it is not valid YAML.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FlowError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FlowError::Io(e)
        }
    })?;

    let value: Value = serde_yaml::from_str(&content).map_err(|e| FlowError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(if value.is_null() {
        Value::Mapping(Default::default())
    } else {
        value
    })
}

/// Load and parse a single settings file without layering.
pub fn load_config_file(path: &Path) -> Result<FlowSettings> {
    let value = load_config_value(path)?;
    parse_settings(value, path)
}

/// Load and layer every settings file that applies to `project_root`.
///
/// Missing files are skipped; with none present the defaults are returned.
pub fn load_merged_settings(project_root: &Path) -> Result<FlowSettings> {
    let paths = ConfigPaths::discover(project_root);

    let mut merged = Value::Mapping(Default::default());
    for path in paths.all_existing() {
        tracing::debug!("loading settings from {}", path.display());
        overlay(&mut merged, load_config_value(path)?);
    }

    parse_settings(merged, &project_root.join(CONFIG_DIR).join("config.yml"))
}

/// Load settings, from `config_override` alone when given.
pub fn load_settings(project_root: &Path, config_override: Option<&Path>) -> Result<FlowSettings> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_settings(project_root),
    }
}

fn parse_settings(value: Value, source: &Path) -> Result<FlowSettings> {
    serde_yaml::from_value(value).map_err(|e| FlowError::ConfigParseError {
        path: source.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge `top` into `base`: mappings recurse, a null removes the key,
/// anything else replaces.
pub fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Mapping(base_map), Value::Mapping(top_map)) => {
            for (key, value) in top_map {
                if value.is_null() {
                    base_map.remove(&key);
                } else if let Some(existing) = base_map.get_mut(&key) {
                    overlay(existing, value);
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (base, top) => *base = top,
    }
}
