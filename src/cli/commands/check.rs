//! Check command implementation.
//!
//! The `flowtc check` command runs Flow on one file and prints the
//! diagnostics that land in it. With `--stdin` the document text comes from
//! standard input, standing in for an editor buffer with unsaved edits.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::checker::TypeChecker;
use crate::cli::args::CheckArgs;
use crate::config::{find_project_root, load_settings};
use crate::diagnostics::Document;
use crate::editor::{BufferedFile, ExternalAnnotator};
use crate::error::{FlowError, Result};
use crate::output::{DiagnosticFormatter, HumanFormatter, JsonFormatter, OutputFormat, Report};
use crate::ui::{should_use_colors, UserInterface};

use super::dispatcher::{Command, CommandResult, GlobalOptions};

/// Exit code when the file has diagnostics.
pub const EXIT_DIAGNOSTICS: i32 = 1;

/// Exit code when the checker could not produce a verdict.
pub const EXIT_CHECKER_FAILURE: i32 = 2;

/// The check command implementation.
pub struct CheckCommand {
    options: GlobalOptions,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(options: GlobalOptions, args: CheckArgs) -> Self {
        Self { options, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Canonical path of the file to check.
    ///
    /// With `--stdin` the file itself may not exist yet, so only its
    /// directory has to.
    fn resolve_file(&self) -> Result<PathBuf> {
        let file = &self.args.file;
        match fs::canonicalize(file) {
            Ok(path) => Ok(path),
            Err(e) if self.args.stdin => {
                let name = file.file_name().ok_or(FlowError::Io(e))?;
                let parent = match file.parent() {
                    Some(p) if !p.as_os_str().is_empty() => p,
                    _ => Path::new("."),
                };
                Ok(fs::canonicalize(parent)?.join(name))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_project_root(&self, file: &Path) -> Result<PathBuf> {
        if let Some(project) = &self.options.project {
            return Ok(fs::canonicalize(project)?);
        }
        let dir = file.parent().unwrap_or(file);
        Ok(find_project_root(dir).unwrap_or_else(|| dir.to_path_buf()))
    }

    fn read_text(&self, file: &Path) -> Result<String> {
        if self.args.stdin {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        } else {
            Ok(fs::read_to_string(file)?)
        }
    }

    fn render(&self, report: &Report<'_>) -> Result<String> {
        let mut buffer = Vec::new();
        match self.args.format {
            OutputFormat::Human => {
                HumanFormatter::new(should_use_colors()).format(report, &mut buffer)?
            }
            OutputFormat::Json => JsonFormatter::new().format(report, &mut buffer)?,
        }
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let file = self.resolve_file()?;
        let project_root = self.resolve_project_root(&file)?;
        tracing::debug!(
            "checking {} in project {}",
            file.display(),
            project_root.display()
        );

        let settings = load_settings(&project_root, self.options.config_path())?
            .with_overrides(self.args.flow_path.clone(), self.args.timeout);

        let buffer = BufferedFile {
            text: self.read_text(&file)?,
            path: file.clone(),
            project_root: project_root.clone(),
        };
        let annotator = ExternalAnnotator::new(TypeChecker::new(settings));
        let Some(request) = annotator.collect_information(&buffer) else {
            ui.error(&format!("Cannot check {}", file.display()));
            return Ok(CommandResult::failure(EXIT_CHECKER_FAILURE));
        };

        let shown = file.strip_prefix(&project_root).unwrap_or(&file);

        let mut spinner = ui.start_spinner(&format!("Checking {}", shown.display()));
        let outcome = match annotator.checker().try_check(&request) {
            Ok(outcome) => {
                spinner.finish_clear();
                outcome
            }
            Err(e) => {
                spinner.finish_clear();
                ui.error(&format!("Flow check failed: {}", e));
                if let Some(raw) = e.raw_output() {
                    if ui.output_mode().shows_details() {
                        ui.message(&format!("Raw checker output:\n{}", raw));
                    }
                }
                return Ok(CommandResult::failure(EXIT_CHECKER_FAILURE));
            }
        };

        let document = Document::new(request.document_text());
        let report = Report::new(shown, &document, &outcome.diagnostics);
        let rendered = self.render(&report)?;
        if !rendered.is_empty() {
            ui.emit(&rendered);
        }

        if ui.output_mode().shows_details() {
            ui.message(&format!(
                "Flow finished in {:.2?} (exit code {:?})",
                outcome.duration, outcome.exit_code
            ));
        }

        if outcome.diagnostics.is_empty() {
            if !outcome.passed {
                ui.warning("Flow reported errors in other files only");
            }
            if self.args.format == OutputFormat::Human {
                ui.success(&format!("No errors in {}", shown.display()));
            }
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(EXIT_DIAGNOSTICS))
        }
    }
}
