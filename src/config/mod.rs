//! Checker settings: which executable to run, with which arguments.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, layering and project root lookup in [`loader`]
//!
//! # Example
//!
//! ```
//! use flowtc::config::{load_merged_settings, FlowSettings};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".flowtc");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "timeout_secs: 20").unwrap();
//!
//! let settings = load_merged_settings(temp.path()).unwrap();
//! assert_eq!(settings.timeout_secs, Some(20));
//! assert_eq!(settings.args, FlowSettings::default().args);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    find_project_root, load_config_file, load_config_value, load_merged_settings, load_settings,
    overlay, ConfigPaths, CONFIG_DIR, FLOWCONFIG,
};
pub use schema::{FlowSettings, DEFAULT_CHECKER_ARGS};
