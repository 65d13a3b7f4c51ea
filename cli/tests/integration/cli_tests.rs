//! Integration tests for the devpod CLI skeleton
//!
//! These tests verify the CLI structure and argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn devpod() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("devpod"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    devpod().assert().code(2).stderr(predicate::str::contains(
        "Build and start development containers",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    devpod()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    devpod()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("devpod"));
}

#[test]
fn test_version_command_shows_version() {
    devpod()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "devpod {}",
            env!("CARGO_PKG_VERSION")
        )));
}

// --- Argument parsing ---

#[test]
fn test_build_help_shows_path_and_open() {
    devpod()
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--path"))
        .stdout(predicate::str::contains("--open"));
}

#[test]
fn test_up_is_an_alias_for_build() {
    devpod()
        .args(["up", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--open"));
}

#[test]
fn test_global_flags_accepted_after_subcommand() {
    devpod()
        .args(["version", "--quiet", "--debug", "--no-color"])
        .assert()
        .success();
}

#[test]
fn test_unknown_subcommand_fails() {
    devpod()
        .arg("launch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
