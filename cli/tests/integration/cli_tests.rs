//! Integration tests for the webhost CLI surface: help, version, errors.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

pub fn webhost() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("webhost"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("WEBHOST_CONFIG");
    cmd.env_remove("WEBHOST_LOG");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    webhost().assert().code(2).stderr(predicate::str::contains(
        "Declare a single EC2 web server",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    webhost()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("synth"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    webhost()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("webhost"));
}

#[test]
fn test_version_command_shows_version() {
    webhost()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("webhost 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = webhost()
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["version"], "0.1.0");
}

#[test]
fn test_synth_help_shows_flags() {
    webhost()
        .args(["synth", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--id"))
        .stdout(predicate::str::contains("--key-name"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--project-dir"));
}

#[test]
fn test_unknown_command_fails() {
    webhost().arg("deploy").assert().failure();
}

#[test]
fn test_synth_rejects_unknown_format() {
    webhost()
        .args(["synth", "--format", "toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("toml"));
}
