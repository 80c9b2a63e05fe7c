//! Checker subprocess execution.
//!
//! The checker reads the document from stdin and may write large amounts of
//! output before it has consumed all of its input. Both output pipes are
//! drained on their own threads, started before the stdin write, so neither
//! side can stall on a full pipe buffer.

use crate::error::{FlowError, Result};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Captured result of a checker run.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Everything the process wrote to stdout.
    pub stdout: String,

    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Wall-clock time from spawn to exit.
    pub duration: Duration,
}

impl ProcessOutput {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run `executable` with `args` in `cwd`, feeding it `stdin_text`.
///
/// Returns the full stdout text and exit code once both output streams have
/// reached end-of-stream and the process has exited. Stderr is logged at
/// debug level and discarded.
pub fn run(
    executable: &Path,
    args: &[String],
    cwd: &Path,
    stdin_text: &str,
) -> Result<ProcessOutput> {
    run_inner(executable, args, cwd, stdin_text, None)
}

/// Like [`run`], but kills the process if it has not finished within `timeout`.
///
/// Killing the process closes its pipes, which ends both drain threads, so
/// the call always returns shortly after the deadline with
/// [`FlowError::TimedOut`]. Only the direct child is killed.
pub fn run_with_deadline(
    executable: &Path,
    args: &[String],
    cwd: &Path,
    stdin_text: &str,
    timeout: Duration,
) -> Result<ProcessOutput> {
    run_inner(executable, args, cwd, stdin_text, Some(timeout))
}

fn run_inner(
    executable: &Path,
    args: &[String],
    cwd: &Path,
    stdin_text: &str,
    timeout: Option<Duration>,
) -> Result<ProcessOutput> {
    let start = Instant::now();

    if !cwd.is_dir() {
        return Err(FlowError::SpawnFailed {
            path: executable.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("working directory {} does not exist", cwd.display()),
            ),
        });
    }

    let mut cmd = Command::new(executable);
    cmd.args(args);
    cmd.current_dir(cwd);
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!(
        "spawning {} {} in {}",
        executable.display(),
        args.join(" "),
        cwd.display()
    );

    let mut child = cmd.spawn().map_err(|e| spawn_error(executable, e))?;

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let (Some(stdin), Some(stdout), Some(stderr)) = (stdin, stdout, stderr) else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(FlowError::Interrupted {
            message: "checker started without piped stdio".to_string(),
        });
    };

    // Drains must be running before the first byte goes to stdin.
    let stdout_handle = drain("stdout", stdout);
    let stderr_handle = drain("stderr", stderr);

    let child = Arc::new(Mutex::new(child));
    let watchdog = timeout.map(|t| Watchdog::arm(Arc::clone(&child), t));

    let write_result = write_stdin(stdin, stdin_text);

    let stdout_result = join_drain("stdout", stdout_handle);
    let stderr_result = join_drain("stderr", stderr_handle);

    let timed_out = watchdog.map(Watchdog::disarm).unwrap_or(false);

    let status = {
        let mut child = child.lock().map_err(|_| FlowError::Interrupted {
            message: "checker handle poisoned".to_string(),
        })?;
        child.wait().map_err(|e| FlowError::Interrupted {
            message: format!("waiting for checker exit: {}", e),
        })?
    };

    let duration = start.elapsed();

    if timed_out {
        let secs = timeout.map(|t| t.as_secs()).unwrap_or_default();
        tracing::warn!("checker killed after {}s deadline", secs);
        return Err(FlowError::TimedOut { secs });
    }

    write_result?;
    let stdout = stdout_result?;
    let stderr = stderr_result?;

    if !stderr.trim().is_empty() {
        tracing::debug!("checker stderr: {}", stderr.trim_end());
    }

    tracing::debug!(
        "checker exited with {:?} after {:?} ({} bytes stdout, {} bytes stderr)",
        status.code(),
        duration,
        stdout.len(),
        stderr.len()
    );

    Ok(ProcessOutput {
        stdout,
        exit_code: status.code(),
        duration,
    })
}

fn spawn_error(executable: &Path, source: std::io::Error) -> FlowError {
    let path = executable.to_path_buf();
    match source.kind() {
        std::io::ErrorKind::NotFound => FlowError::ExecutableNotFound { path },
        std::io::ErrorKind::PermissionDenied => FlowError::NotExecutable { path },
        _ => FlowError::SpawnFailed { path, source },
    }
}

/// Write the document and close stdin so the checker sees end-of-input.
fn write_stdin(mut stdin: ChildStdin, text: &str) -> Result<()> {
    stdin
        .write_all(text.as_bytes())
        .and_then(|_| stdin.flush())
        .map_err(|source| FlowError::StreamIo {
            stream: "stdin",
            source,
        })
    // stdin dropped here
}

fn drain<R: Read + Send + 'static>(
    stream: &'static str,
    mut reader: R,
) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        tracing::trace!("{} reached end-of-stream", stream);
        Ok(buf)
    })
}

fn join_drain(
    stream: &'static str,
    handle: JoinHandle<std::io::Result<Vec<u8>>>,
) -> Result<String> {
    let bytes = handle
        .join()
        .map_err(|_| FlowError::Interrupted {
            message: format!("{} reader panicked", stream),
        })?
        .map_err(|source| FlowError::StreamIo { stream, source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Kills the child if not disarmed before the deadline.
struct Watchdog {
    cancel: mpsc::Sender<()>,
    handle: JoinHandle<bool>,
}

impl Watchdog {
    fn arm(child: Arc<Mutex<Child>>, timeout: Duration) -> Self {
        let (cancel, cancelled) = mpsc::channel::<()>();
        let handle = thread::spawn(move || match cancelled.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => match child.lock() {
                Ok(mut child) => kill_if_running(&mut child),
                Err(_) => false,
            },
            _ => false,
        });
        Self { cancel, handle }
    }

    /// Stop the watchdog. Returns whether it killed the child.
    fn disarm(self) -> bool {
        let _ = self.cancel.send(());
        self.handle.join().unwrap_or(false)
    }
}

/// Kill `child` unless it has already exited. Returns whether it was killed.
///
/// A child that exited on its own may still be holding the deadline open
/// through a descendant that inherited its pipes; that is not a timeout.
fn kill_if_running(child: &mut Child) -> bool {
    match child.try_wait() {
        Ok(Some(status)) => {
            tracing::debug!("checker already exited with {:?} at deadline", status.code());
            return false;
        }
        Ok(None) => {}
        Err(e) => tracing::debug!("polling checker at deadline failed: {}", e),
    }
    match child.kill() {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("kill after deadline failed: {}", e);
            false
        }
    }
}

/// Resolve a bare executable name against `PATH`, for display and checks.
///
/// Paths containing a separator are returned unchanged when they exist.
pub fn resolve_executable(name: &Path) -> Option<PathBuf> {
    if name.components().count() > 1 {
        return name.exists().then(|| name.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn sh(script: &str) -> (PathBuf, Vec<String>) {
        (
            PathBuf::from("sh"),
            vec!["-c".to_string(), script.to_string()],
        )
    }

    #[test]
    fn echoes_stdin_to_stdout() {
        let temp = TempDir::new().unwrap();
        let result = run(Path::new("cat"), &[], temp.path(), "let x = 1;\n").unwrap();

        assert!(result.success());
        assert_eq!(result.stdout, "let x = 1;\n");
    }

    #[test]
    fn reports_nonzero_exit_code() {
        let temp = TempDir::new().unwrap();
        let (exe, args) = sh("cat >/dev/null; echo '{}'; exit 2");
        let result = run(&exe, &args, temp.path(), "").unwrap();

        assert!(!result.success());
        assert_eq!(result.exit_code, Some(2));
        assert_eq!(result.stdout.trim(), "{}");
    }

    #[test]
    fn stderr_is_not_part_of_stdout() {
        let temp = TempDir::new().unwrap();
        let (exe, args) = sh("echo out; echo err >&2");
        let result = run(&exe, &args, temp.path(), "").unwrap();

        assert_eq!(result.stdout, "out\n");
    }

    #[test]
    fn runs_in_working_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".flowconfig"), "[options]\n").unwrap();
        let (exe, args) = sh("cat .flowconfig");
        let result = run(&exe, &args, temp.path(), "").unwrap();

        assert_eq!(result.stdout, "[options]\n");
    }

    #[test]
    fn missing_executable_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("no-such-flow");
        let err = run(&missing, &[], temp.path(), "").unwrap_err();

        assert!(matches!(err, FlowError::ExecutableNotFound { .. }));
    }

    #[test]
    fn non_executable_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("flow");
        std::fs::write(&script, "#!/bin/sh\necho hi\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

        let err = run(&script, &[], temp.path(), "").unwrap_err();
        assert!(matches!(err, FlowError::NotExecutable { .. }));
    }

    #[test]
    fn missing_working_directory_fails_to_spawn() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("gone");
        let err = run(Path::new("cat"), &[], &gone, "").unwrap_err();

        assert!(matches!(err, FlowError::SpawnFailed { .. }));
    }

    #[test]
    fn large_output_on_both_streams_before_reading_stdin_does_not_deadlock() {
        let temp = TempDir::new().unwrap();
        // Well beyond any pipe buffer, written before stdin is consumed.
        let (exe, args) = sh(
            "yes o | head -c 1048576; yes e | head -c 1048576 >&2; cat >/dev/null; exit 0",
        );
        let input = "x".repeat(1024 * 1024);

        let start = Instant::now();
        let result =
            run_with_deadline(&exe, &args, temp.path(), &input, Duration::from_secs(60)).unwrap();

        assert!(result.success());
        assert_eq!(result.stdout.len(), 1048576);
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[test]
    fn deadline_kills_hung_checker() {
        let temp = TempDir::new().unwrap();
        let (exe, args) = sh("exec sleep 30");

        let start = Instant::now();
        let err = run_with_deadline(&exe, &args, temp.path(), "", Duration::from_millis(200))
            .unwrap_err();

        assert!(matches!(err, FlowError::TimedOut { .. }));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn deadline_after_exit_is_not_a_timeout() {
        let temp = TempDir::new().unwrap();
        // The shell exits at once; the background sleep keeps stdout open
        // past the deadline.
        let (exe, args) = sh("echo out; sleep 1 &");

        let result =
            run_with_deadline(&exe, &args, temp.path(), "", Duration::from_millis(200)).unwrap();

        assert!(result.success());
        assert_eq!(result.stdout, "out\n");
    }

    #[test]
    fn kill_if_running_leaves_exited_child_alone() {
        let mut child = Command::new("true").spawn().unwrap();
        child.wait().unwrap();

        assert!(!kill_if_running(&mut child));
    }

    #[test]
    fn kill_if_running_kills_live_child() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();

        assert!(kill_if_running(&mut child));
        assert!(!child.wait().unwrap().success());
    }

    #[test]
    fn deadline_not_reached_returns_output() {
        let temp = TempDir::new().unwrap();
        let (exe, args) = sh("cat");
        let result =
            run_with_deadline(&exe, &args, temp.path(), "abc", Duration::from_secs(30)).unwrap();

        assert_eq!(result.stdout, "abc");
    }

    #[test]
    fn resolve_executable_finds_sh_on_path() {
        let found = resolve_executable(Path::new("sh"));
        assert!(found.is_some());
    }

    #[test]
    fn resolve_executable_rejects_missing_path() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_executable(&temp.path().join("nope")).is_none());
    }
}
