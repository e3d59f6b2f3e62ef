// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Command-line tests for the `aocbench` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RUN_ONE: &str = "AOC 2023 puzzle 1\n...\nTime to solve: 12.50ms\n";
const RUN_TWO: &str = "AOC 2023 puzzle 1\n...\nTime to solve: 13.50ms\n";

const EXPECTED_REPORT: &str =
    "### 2023 (1/25 📝)\n\n| Puzzle | Time (ms) |\n|:---|---:|\n| 1 | 13.000 |\n\n";

fn aocbench(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("aocbench").expect("binary should be built");
    cmd.current_dir(dir).env("RUST_LOG", "warn");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("Failed to write fixture");
}

#[test]
fn test_parse_captured_runs() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "run1.txt", RUN_ONE);
    write(temp_dir.path(), "run2.txt", RUN_TWO);

    aocbench(temp_dir.path())
        .args(["parse", "run1.txt", "run2.txt"])
        .assert()
        .success()
        .stdout(EXPECTED_REPORT)
        .stderr(predicate::str::contains("100% complete..."));
}

#[test]
fn test_parse_json_format() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "run1.txt", RUN_ONE);

    aocbench(temp_dir.path())
        .args(["parse", "--format", "json", "run1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"year\": 2023"))
        .stdout(predicate::str::contains("\"mean_ms\": 12.5"));
}

#[test]
fn test_parse_skips_malformed_lines() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "run.txt",
        "AOC 2022 puzzle 3\nTime to solve: abcms\nAOC 2022 puzzle 4\nTime to solve: 2.0ms\n",
    );

    aocbench(temp_dir.path())
        .args(["parse", "run.txt"])
        .assert()
        .success()
        .stdout("### 2022 (1/25 📝)\n\n| Puzzle | Time (ms) |\n|:---|---:|\n| 4 | 2.000 |\n\n")
        .stderr(predicate::str::contains("Skipping solver output line"));
}

#[test]
fn test_parse_missing_file_reports_error() {
    let temp_dir = TempDir::new().unwrap();

    aocbench(temp_dir.path())
        .args(["parse", "missing.txt"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("ERROR:"));
}

#[test]
fn test_run_with_configured_solver() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "transcript.txt", RUN_ONE);
    write(
        temp_dir.path(),
        "aocbench.yaml",
        "run_count: 4\nsolver:\n  program: sh\n  args: [\"-c\", \"cat transcript.txt\"]\n",
    );

    aocbench(temp_dir.path())
        .args(["run", "--runs", "2"])
        .assert()
        .success()
        .stdout("### 2023 (1/25 📝)\n\n| Puzzle | Time (ms) |\n|:---|---:|\n| 1 | 12.500 |\n\n")
        .stderr(predicate::str::contains("100% complete..."))
        .stderr(predicate::str::contains("50% complete...").not());
}

#[test]
fn test_default_command_runs_session() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "transcript.txt", RUN_TWO);
    write(
        temp_dir.path(),
        "bench.yaml",
        "run_count: 1\nsolver:\n  program: sh\n  args: [\"-c\", \"cat transcript.txt\"]\n",
    );

    aocbench(temp_dir.path())
        .args(["--config", "bench.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| 1 | 13.500 |"));
}

#[test]
fn test_run_warns_about_skipped_output() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "transcript.txt",
        "Time to solve: 1.0ms\nAOC 2023 puzzle 2\nTime to solve: ??ms\nTime to solve: 4.0ms\n",
    );
    write(
        temp_dir.path(),
        "aocbench.yaml",
        "run_count: 1\nsolver:\n  program: sh\n  args: [\"-c\", \"cat transcript.txt\"]\n",
    );

    aocbench(temp_dir.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("| 2 | 4.000 |"))
        .stderr(predicate::str::contains("Some solver output was left out of the report"))
        .stderr(predicate::str::contains("malformed_lines=1"))
        .stderr(predicate::str::contains("orphans=1"));
}

#[test]
fn test_missing_solver_fails_with_error_line() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "aocbench.yaml",
        "solver:\n  program: ./no-such-solver\n  args: []\n",
    );

    aocbench(temp_dir.path())
        .arg("run")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("ERROR: Failed to launch solver"));
}

#[test]
fn test_zero_runs_rejected() {
    let temp_dir = TempDir::new().unwrap();

    aocbench(temp_dir.path())
        .args(["run", "--runs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run count must be at least 1"));
}

#[test]
fn test_validate_config() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "aocbench.yaml",
        "run_count: 7\non_nonzero_exit: keep\n",
    );

    aocbench(temp_dir.path())
        .args(["validate", "aocbench.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Run Count:          7"))
        .stdout(predicate::str::contains("cargo run --release"))
        .stdout(predicate::str::contains("Keep"));
}

#[test]
fn test_validate_rejects_bad_config() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "aocbench.yaml", "run_count: 0\n");

    aocbench(temp_dir.path())
        .args(["validate", "aocbench.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR: Hard validation error"));
}

/// Second invocation marks itself started and hangs, so the session can be
/// interrupted with exactly one completed invocation.
#[cfg(unix)]
const HANGING_SOLVER: &str = "\
if [ -f first-done ]; then
    touch second-started
    exec sleep 30
fi
echo 'AOC 2023 puzzle 1'
echo 'Time to solve: 2.0ms'
touch first-done
";

#[cfg(unix)]
fn interrupt_session(extra_args: &[&str]) -> std::process::Output {
    use std::process::{Command as StdCommand, Stdio};
    use std::time::{Duration, Instant};

    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "solver.sh", HANGING_SOLVER);
    write(
        temp_dir.path(),
        "aocbench.yaml",
        "run_count: 2\nsolver:\n  program: sh\n  args: [\"solver.sh\"]\n",
    );

    let child = StdCommand::new(assert_cmd::cargo::cargo_bin("aocbench"))
        .arg("run")
        .args(extra_args)
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "warn")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn aocbench");

    let marker = temp_dir.path().join("second-started");
    let deadline = Instant::now() + Duration::from_secs(20);
    while !marker.exists() {
        assert!(Instant::now() < deadline, "second invocation never started");
        std::thread::sleep(Duration::from_millis(20));
    }
    std::thread::sleep(Duration::from_millis(100));

    kill(Pid::from_raw(child.id() as i32), Signal::SIGINT).expect("Failed to send SIGINT");
    child.wait_with_output().expect("Failed to wait for aocbench")
}

#[cfg(unix)]
#[test]
fn test_interrupt_exits_130_without_report() {
    let output = interrupt_session(&[]);

    assert_eq!(output.status.code(), Some(130));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ctrl+C received, terminating..."), "stderr: {}", stderr);
}

#[cfg(unix)]
#[test]
fn test_interrupt_prints_partial_report() {
    let output = interrupt_session(&["--partial-on-interrupt"]);

    assert_eq!(output.status.code(), Some(130));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "### 2023 (1/25 📝)\n\n| Puzzle | Time (ms) |\n|:---|---:|\n| 1 | 2.000 |\n\n"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("Ctrl+C received, terminating..."));
}
