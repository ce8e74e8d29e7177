use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn scratch() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = dir.path().join("wellness.toml");
    let database = dir.path().join("wellness.db");
    (dir, config, database)
}

fn run_wellness(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wellness"))
        .args(args)
        .output()
        .expect("run wellness")
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn help_lists_all_subcommands() {
    let output = run_wellness(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["students", "counselors", "appointments", "assess", "menu"] {
        assert!(stdout.contains(subcommand), "missing {subcommand}");
    }
}

#[test]
fn students_on_fresh_database_reports_empty_roster() {
    let (_dir, config, database) = scratch();
    let output = run_wellness(&[
        "students",
        "--config",
        config.to_str().unwrap(),
        "--database",
        database.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "expected success, got: {}",
        combined(&output)
    );
    assert!(combined(&output).contains("No students on file"));
}

#[test]
fn assess_with_unknown_references_rolls_back_and_exits_nonzero() {
    let (_dir, config, database) = scratch();
    let output = run_wellness(&[
        "assess",
        "--config",
        config.to_str().unwrap(),
        "--database",
        database.to_str().unwrap(),
        "--student",
        "1",
        "--counselor",
        "1",
        "--date",
        "2024-03-01",
        "--anxiety",
        "3",
        "--depression",
        "4",
        "--stress",
        "2",
    ]);

    assert!(!output.status.success(), "expected nonzero exit code");
    assert!(
        combined(&output).contains("constraint"),
        "expected constraint violation message, got: {}",
        combined(&output)
    );
}

#[test]
fn assess_rejects_out_of_range_score() {
    let (_dir, config, database) = scratch();
    let output = run_wellness(&[
        "assess",
        "--config",
        config.to_str().unwrap(),
        "--database",
        database.to_str().unwrap(),
        "--student",
        "1",
        "--counselor",
        "1",
        "--date",
        "2024-03-01",
        "--anxiety",
        "11",
        "--depression",
        "4",
        "--stress",
        "2",
    ]);

    assert!(!output.status.success(), "expected nonzero exit code");
    assert!(
        combined(&output).contains("outside 0-10"),
        "expected score range message, got: {}",
        combined(&output)
    );
}

#[test]
fn set_status_on_unknown_appointment_warns_without_failing() {
    let (_dir, config, database) = scratch();
    let output = run_wellness(&[
        "appointments",
        "set-status",
        "--config",
        config.to_str().unwrap(),
        "--database",
        database.to_str().unwrap(),
        "--id",
        "1",
        "completed",
    ]);

    assert!(
        output.status.success(),
        "expected success, got: {}",
        combined(&output)
    );
    assert!(combined(&output).contains("No appointment found"));
}

#[test]
fn invalid_status_value_is_rejected_by_the_parser() {
    let output = run_wellness(&["appointments", "set-status", "--id", "1", "finished"]);
    assert!(!output.status.success());
}
