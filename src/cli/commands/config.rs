//! Config command implementation.
//!
//! The `flowtc config` command shows the resolved checker settings.

use std::fs;
use std::path::PathBuf;

use crate::cli::args::ConfigArgs;
use crate::config::{find_project_root, load_settings, ConfigPaths};
use crate::error::{FlowError, Result};
use crate::process::resolve_executable;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, GlobalOptions};

/// The config command implementation.
pub struct ConfigCommand {
    options: GlobalOptions,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(options: GlobalOptions, args: ConfigArgs) -> Self {
        Self { options, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }

    /// `--project`, else the project containing the current directory.
    fn project_root(&self) -> Result<PathBuf> {
        if let Some(project) = &self.options.project {
            return Ok(fs::canonicalize(project)?);
        }
        let cwd = std::env::current_dir()?;
        Ok(find_project_root(&cwd).unwrap_or(cwd))
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project_root = self.project_root()?;
        let settings = load_settings(&project_root, self.options.config_path())?;

        let sources: Vec<PathBuf> = match self.options.config_path() {
            Some(path) => vec![path.to_path_buf()],
            None => ConfigPaths::discover(&project_root)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        };
        if sources.is_empty() {
            ui.message("# no settings files, using defaults");
        }
        for path in &sources {
            ui.message(&format!("# {}", path.display()));
        }

        let rendered = if self.args.json {
            let mut json =
                serde_json::to_string_pretty(&settings).map_err(|e| FlowError::Other(e.into()))?;
            json.push('\n');
            json
        } else {
            serde_yaml::to_string(&settings).map_err(|e| FlowError::Other(e.into()))?
        };
        ui.emit(&rendered);

        match resolve_executable(&settings.flow_path) {
            Some(path) => ui.message(&format!("# checker resolves to {}", path.display())),
            None => ui.warning(&format!(
                "Checker executable {} not found",
                settings.flow_path.display()
            )),
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".flowtc");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    fn options_for(temp: &TempDir) -> GlobalOptions {
        GlobalOptions {
            project: Some(temp.path().to_path_buf()),
            config: None,
        }
    }

    #[test]
    fn shows_yaml_settings() {
        let temp = setup_project("flow_path: /opt/flow/bin/flow\ntimeout_secs: 20\n");
        let cmd = ConfigCommand::new(options_for(&temp), ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.emitted().contains("flow_path: /opt/flow/bin/flow"));
        assert!(ui.emitted().contains("timeout_secs: 20"));
        assert!(ui.messages().iter().any(|m| m.contains("config.yml")));
    }

    #[test]
    fn shows_json_settings() {
        let temp = setup_project("stdin_sentinel: \"<stdin>\"\n");
        let args = ConfigArgs { json: true };
        let cmd = ConfigCommand::new(options_for(&temp), args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(ui.emitted()).unwrap();
        assert_eq!(json["stdin_sentinel"], "<stdin>");
        assert_eq!(json["args"][0], "check-contents");
    }

    #[test]
    fn explicit_config_file_is_the_only_source() {
        let temp = setup_project("flow_path: ignored\n");
        let explicit = temp.path().join("custom.yml");
        fs::write(&explicit, "flow_path: /custom/flow\n").unwrap();
        let options = GlobalOptions {
            project: Some(temp.path().to_path_buf()),
            config: Some(explicit.clone()),
        };
        let cmd = ConfigCommand::new(options, ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.emitted().contains("/custom/flow"));
        assert_eq!(ui.messages(), [format!("# {}", explicit.display())]);
        assert_eq!(ui.warnings(), ["Checker executable /custom/flow not found"]);
    }

    #[test]
    fn invalid_settings_fail() {
        let temp = setup_project("timeout_secs: [not, a, number]\n");
        let cmd = ConfigCommand::new(options_for(&temp), ConfigArgs::default());
        let mut ui = MockUI::new();

        assert!(matches!(
            cmd.execute(&mut ui),
            Err(FlowError::ConfigParseError { .. })
        ));
    }
}
