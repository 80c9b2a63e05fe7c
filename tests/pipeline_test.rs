//! End-to-end checks through a stand-in checker process.
#![cfg(unix)]

use flowtc::checker::{CheckRequest, TypeChecker};
use flowtc::config::FlowSettings;
use flowtc::diagnostics::TextRange;
use flowtc::FlowError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A checker that runs `script` with `sh` inside a fresh project.
fn checker_with_script(script: &str) -> (TempDir, PathBuf, TypeChecker) {
    let temp = TempDir::new().unwrap();
    let root = fs::canonicalize(temp.path()).unwrap();
    fs::write(root.join(".flowconfig"), "").unwrap();
    let script_path = root.join("checker.sh");
    fs::write(&script_path, script).unwrap();

    let settings = FlowSettings {
        flow_path: PathBuf::from("/bin/sh"),
        args: vec![script_path.to_string_lossy().into_owned()],
        ..Default::default()
    };
    (temp, root, TypeChecker::new(settings))
}

#[test]
fn large_document_reaches_the_checker() {
    let script = r#"lines=$(wc -l | tr -d ' ')
cat <<EOF
{"passed": false, "errors": [{"message": [
  {"descr": "last line", "path": "-", "line": $lines, "endline": $lines, "start": 1, "end": 3}
]}]}
EOF
"#;
    let (_temp, root, checker) = checker_with_script(script);
    let text = "var a = 1;\n".repeat(20_000);
    let request = CheckRequest::new(text, root.join("big.js"), &root);

    let outcome = checker.try_check(&request).unwrap();

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].range,
        TextRange::new(19_999 * 11, 19_999 * 11 + 3)
    );
}

#[test]
fn stderr_noise_and_exit_code_do_not_matter() {
    let script = r#"cat > /dev/null
i=0
while [ $i -lt 2000 ]; do
  echo "Server is initializing (parsed files $i)" >&2
  i=$((i + 1))
done
echo '{"passed": false, "errors": [{"message": [{"descr": "boom", "path": "-", "line": 1, "endline": 1, "start": 1, "end": 1}]}]}'
exit 2
"#;
    let (_temp, root, checker) = checker_with_script(script);
    let request = CheckRequest::new("x;\n", root.join("a.js"), &root);

    let outcome = checker.try_check(&request).unwrap();

    assert!(!outcome.passed);
    assert_eq!(outcome.exit_code, Some(2));
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].message, "boom");
}

#[test]
fn checker_runs_in_the_project_root() {
    let script = r#"cat > /dev/null
if [ -f .flowconfig ]; then
  echo '{"passed": true}'
else
  echo 'not in project'
fi
"#;
    let (_temp, root, checker) = checker_with_script(script);
    let request = CheckRequest::new("", root.join("a.js"), &root);

    let outcome = checker.try_check(&request).unwrap();
    assert!(outcome.passed);
}

#[test]
fn inconsistent_response_degrades_to_nothing() {
    let script = "cat > /dev/null\necho '{\"passed\": false}'\n";
    let (_temp, root, checker) = checker_with_script(script);
    let request = CheckRequest::new("x;\n", root.join("a.js"), &root);

    assert!(matches!(
        checker.try_check(&request),
        Err(FlowError::InconsistentResponse)
    ));
    assert!(checker.check(&request).is_empty());
}

#[test]
fn deadline_stops_a_stuck_checker() {
    let (_temp, root, checker) = checker_with_script("exec sleep 30\n");
    let checker = TypeChecker::new(FlowSettings {
        timeout_secs: Some(1),
        ..checker.settings().clone()
    });
    let request = CheckRequest::new("x;\n", root.join("a.js"), &root);

    let started = std::time::Instant::now();
    let result = checker.try_check(&request);

    assert!(matches!(result, Err(FlowError::TimedOut { secs: 1 })));
    assert!(started.elapsed() < std::time::Duration::from_secs(20));
}
