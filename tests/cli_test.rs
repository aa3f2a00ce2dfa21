//! CLI integration tests.
//!
//! Drives the compiled `roster` binary against a temporary database.

mod common;

use common::TestFixture;
use std::process::{Command, Output};

fn roster(fixture: &TestFixture, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_roster"))
        .args(["--db-path", fixture.db_path_str()])
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to run roster")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_help_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_roster"))
        .arg("--help")
        .output()
        .expect("failed to run");
    let stdout = stdout(&output);

    for expected in ["init", "add", "list", "generate", "search", "optimize", "--db-path"] {
        assert!(stdout.contains(expected), "help should mention {expected}");
    }
}

#[test]
fn test_cli_version_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_roster"))
        .arg("--version")
        .output()
        .expect("failed to run");
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_add_list_and_duplicate() {
    let fixture = TestFixture::new();

    assert!(roster(&fixture, &["init"]).status.success());

    let added = roster(&fixture, &["add", "Ivanov Petr Sergeevich", "1990-05-15", "муж"]);
    assert!(added.status.success());
    assert!(stdout(&added).contains("added successfully"));

    let duplicate = roster(&fixture, &["add", "Ivanov Petr Sergeevich", "1990-05-15", "Female"]);
    assert!(duplicate.status.success());
    assert!(stdout(&duplicate).contains("already exists"));

    let listed = roster(&fixture, &["--output", "json", "list"]);
    assert!(listed.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&listed.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["gender"], "Male");
}

#[test]
fn test_cli_add_rejects_invalid_date() {
    let fixture = TestFixture::new();
    assert!(roster(&fixture, &["init"]).status.success());

    let output = roster(&fixture, &["add", "Ivanov Petr", "15.05.1990", "Male"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_generate_then_optimize() {
    let fixture = TestFixture::new();
    assert!(roster(&fixture, &["init"]).status.success());

    let generated = roster(
        &fixture,
        &["--output", "json", "generate", "--count", "500", "--special", "100", "--seed", "9"],
    );
    assert!(generated.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&generated.stdout).unwrap();
    assert_eq!(summary["inserted"], 600);

    let optimized = roster(&fixture, &["--output", "json", "optimize"]);
    assert!(optimized.status.success());
    let report: serde_json::Value = serde_json::from_slice(&optimized.stdout).unwrap();
    assert_eq!(report["rows_before"], 100);
    assert_eq!(report["rows_after"], 100);

    let info = roster(&fixture, &["--output", "json", "info"]);
    let info: serde_json::Value = serde_json::from_slice(&info.stdout).unwrap();
    assert_eq!(info["row_count"], 600);
    assert_eq!(info["indexes"].as_array().unwrap().len(), 6);
}
