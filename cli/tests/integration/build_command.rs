//! Integration tests for `devpod build`.
//!
//! Only the paths that fail before the first runtime invocation are exercised
//! here; the sequencing itself is covered by the unit tests.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn devpod(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("devpod"));
    cmd.env("NO_COLOR", "1")
        .env("DEVPOD_CONFIG", config_dir.path().join("config.yaml"));
    cmd
}

#[test]
fn test_build_without_descriptor_fails_with_not_found() {
    let config = TempDir::new().expect("temp dir");
    let project = TempDir::new().expect("temp dir");

    devpod(&config)
        .args(["build", "--path"])
        .arg(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("devcontainer.json not found"));
}

#[test]
fn test_build_with_malformed_descriptor_fails() {
    let config = TempDir::new().expect("temp dir");
    let project = TempDir::new().expect("temp dir");
    let dir = project.path().join(".devcontainer");
    std::fs::create_dir_all(&dir).expect("mkdir");
    std::fs::write(dir.join("devcontainer.json"), r#"{ "name": "no build" }"#).expect("write");

    devpod(&config)
        .args(["build", "--path"])
        .arg(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed descriptor"));
}

#[test]
fn test_build_does_not_write_buildconfig_on_failure() {
    let config = TempDir::new().expect("temp dir");
    let project = TempDir::new().expect("temp dir");

    devpod(&config)
        .args(["up", "--path"])
        .arg(project.path())
        .assert()
        .failure();
    assert!(!project.path().join(".buildconfig").exists());
}

#[test]
fn test_build_with_unreadable_config_fails() {
    let config = TempDir::new().expect("temp dir");
    std::fs::write(config.path().join("config.yaml"), "runtime: [1, 2").expect("write");
    let project = TempDir::new().expect("temp dir");

    devpod(&config)
        .args(["build", "--path"])
        .arg(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse"));
}
