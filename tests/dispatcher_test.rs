//! Tests for the command dispatcher (help / run) against real scripts
#![cfg(unix)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use unshell::cli::{dispatch, CliError, Invocation, USAGE};
use unshell::config::Settings;
use unshell::exitcode;
use unshell::infrastructure::traits::{Console, RealCommandRunner, RealFileSystem};
use unshell::infrastructure::ServiceContainer;
use unshell::util::testing;

/// Console that keeps every line for assertions.
#[derive(Default)]
struct RecordingConsole {
    out: Mutex<Vec<String>>,
    err: Mutex<Vec<String>>,
}

impl RecordingConsole {
    fn stdout_lines(&self) -> Vec<String> {
        self.out.lock().unwrap().clone()
    }

    fn stderr_lines(&self) -> Vec<String> {
        self.err.lock().unwrap().clone()
    }
}

impl Console for RecordingConsole {
    fn out(&self, line: &str) {
        self.out.lock().unwrap().push(line.to_string());
    }

    fn err(&self, line: &str) {
        self.err.lock().unwrap().push(line.to_string());
    }
}

fn process_env() -> BTreeMap<String, String> {
    std::env::vars().collect()
}

fn container_with(settings: Settings) -> (ServiceContainer, Arc<RecordingConsole>) {
    testing::init_test_setup();
    let console = Arc::new(RecordingConsole::default());
    let container = ServiceContainer::with_deps(
        settings,
        process_env(),
        Arc::new(RealFileSystem),
        Arc::new(RealCommandRunner),
        console.clone(),
    );
    (container, console)
}

fn container() -> (ServiceContainer, Arc<RecordingConsole>) {
    container_with(Settings::default())
}

fn invocation(args: &[&str]) -> Invocation {
    Invocation::new(args.iter().copied(), process_env())
}

fn create_script(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write script");
    path
}

// ============================================================
// help and fallbacks
// ============================================================

#[test]
fn given_help_command_when_dispatching_then_prints_usage() {
    let (container, console) = container();

    dispatch(&invocation(&["unshell", "help"]), &container).unwrap();

    assert_eq!(console.stdout_lines(), vec![USAGE.to_string()]);
    assert!(console.stdout_lines()[0].contains("Usage:"));
    assert!(console.stdout_lines()[0].contains("unshell COMMAND [SCRIPT_PATH] [ARGS...]"));
}

#[test]
fn given_no_command_when_dispatching_then_prints_usage() {
    let (container, console) = container();

    dispatch(&invocation(&["unshell"]), &container).unwrap();

    assert_eq!(console.stdout_lines(), vec![USAGE.to_string()]);
}

#[test]
fn given_unknown_command_when_dispatching_then_behaves_like_help() {
    let (container, console) = container();

    dispatch(&invocation(&["unshell", "bogus", "foo", "--bar"]), &container).unwrap();

    assert_eq!(console.stdout_lines(), vec![USAGE.to_string()]);
    assert!(console.stderr_lines().is_empty());
}

// ============================================================
// run
// ============================================================

#[test]
fn given_script_with_empty_entry_routine_when_running_then_succeeds_silently() {
    let temp = TempDir::new().unwrap();
    let script = create_script(&temp, "good.script", "script {\n}\n");
    let (container, console) = container();

    dispatch(
        &invocation(&["unshell", "run", script.to_str().unwrap()]),
        &container,
    )
    .unwrap();

    assert!(console.stdout_lines().is_empty());
    assert!(console.stderr_lines().is_empty());
}

#[test]
fn given_script_with_commands_when_running_then_prints_each_command_and_output() {
    let temp = TempDir::new().unwrap();
    let script = create_script(
        &temp,
        "hello.unsh",
        "# prints two words\nscript {\n    echo hello\n    echo world\n}\n",
    );
    let (container, console) = container();

    dispatch(
        &invocation(&["unshell", "run", script.to_str().unwrap()]),
        &container,
    )
    .unwrap();

    assert_eq!(
        console.stdout_lines(),
        vec!["• echo hello", "➜ hello", "• echo world", "➜ world"]
    );
}

#[test]
fn given_trailing_args_when_running_then_they_are_forwarded_to_the_script() {
    let temp = TempDir::new().unwrap();
    let script = create_script(
        &temp,
        "args.unsh",
        "script {\n    echo {2} {1}\n    echo {@} | tr a-z A-Z\n}\n",
    );
    let (container, console) = container();

    dispatch(
        &invocation(&["unshell", "run", script.to_str().unwrap(), "first", "second"]),
        &container,
    )
    .unwrap();

    assert_eq!(
        console.stdout_lines(),
        vec![
            "• echo second first",
            "➜ second first",
            "• echo first second | tr a-z A-Z",
            "➜ FIRST SECOND",
        ]
    );
}

#[test]
fn given_previous_output_placeholder_when_running_then_chains_results() {
    let temp = TempDir::new().unwrap();
    let script = create_script(
        &temp,
        "chain.unsh",
        "script {\n    echo 1\n    echo 2 {}\n    call done\n}\n\ndone {\n    return echo end {}\n    echo unreachable\n}\n",
    );
    let (container, console) = container();

    dispatch(
        &invocation(&["unshell", "run", script.to_str().unwrap()]),
        &container,
    )
    .unwrap();

    assert_eq!(
        console.stdout_lines(),
        vec![
            "• echo 1",
            "➜ 1",
            "• echo 2 1",
            "➜ 2 1",
            "• echo end 2 1",
            "➜ end 2 1",
        ]
    );
}

#[test]
fn given_script_in_search_path_when_running_by_name_then_resolves_it() {
    let temp = TempDir::new().unwrap();
    create_script(&temp, "found-in-path.unsh", "script {\n    echo found\n}\n");
    let settings = Settings {
        script_path: vec![temp.path().to_path_buf()],
        ..Default::default()
    };
    let (container, console) = container_with(settings);

    dispatch(
        &invocation(&["unshell", "run", "found-in-path.unsh"]),
        &container,
    )
    .unwrap();

    assert_eq!(console.stdout_lines(), vec!["• echo found", "➜ found"]);
}

// ============================================================
// failures
// ============================================================

#[test]
fn given_missing_script_when_running_then_fails_with_visible_marker() {
    let (container, console) = container();

    let err = dispatch(
        &invocation(&["unshell", "run", "/tmp/unshell-missing.script"]),
        &container,
    )
    .unwrap_err();

    assert!(matches!(err, CliError::ScriptLoad { .. }));
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
    let out = console.stdout_lines();
    assert_eq!(out.len(), 1);
    assert!(out[0].contains("✘"));
    assert!(out[0].contains("unshell: Invalid SCRIPT_PATH"));
}

#[test]
fn given_run_without_script_path_when_dispatching_then_fails_with_usage_error() {
    let (container, console) = container();

    let err = dispatch(&invocation(&["unshell", "run"]), &container).unwrap_err();

    assert!(matches!(err, CliError::MissingScriptPath));
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(err.to_string().contains("script path is required"));
    assert!(console.stdout_lines()[0].contains("SCRIPT_PATH is required"));
}

#[test]
fn given_unparsable_script_when_running_then_fails_as_data_error() {
    let temp = TempDir::new().unwrap();
    let script = create_script(&temp, "broken.unsh", "echo outside of any routine\n");
    let (container, console) = container();

    let err = dispatch(
        &invocation(&["unshell", "run", script.to_str().unwrap()]),
        &container,
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(console.stdout_lines()[0].contains("unshell: Invalid SCRIPT_PATH"));
}

#[test]
fn given_failing_command_when_running_then_stops_and_reports() {
    let temp = TempDir::new().unwrap();
    let script = create_script(
        &temp,
        "fail.unsh",
        "script {\n    echo oops >&2; exit 3\n    echo never\n}\n",
    );
    let (container, console) = container();

    let err = dispatch(
        &invocation(&["unshell", "run", script.to_str().unwrap()]),
        &container,
    )
    .unwrap_err();

    assert!(matches!(err, CliError::ScriptExecution { .. }));
    assert_eq!(err.exit_code(), exitcode::SOFTWARE);
    assert_eq!(
        console.stdout_lines(),
        vec![
            "• echo oops >&2; exit 3".to_string(),
            unshell::cli::output::failure("unshell: something went wrong"),
        ]
    );
    assert_eq!(console.stderr_lines(), vec!["echo oops >&2; exit 3: oops"]);
}
