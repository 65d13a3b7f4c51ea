//! Integration tests for `devpod config`.
//!
//! All tests set `DEVPOD_CONFIG` to a temp path so they never read or write
//! `~/.devpod/config.yaml`.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn devpod() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("devpod"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    devpod()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_podman_defaults() {
    let (_dir, path) = temp_config_path();
    devpod()
        .args(["config", "show"])
        .env("DEVPOD_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("podman-compose"))
        .stdout(predicate::str::contains("1800"));
}

#[test]
fn test_config_set_engine_persists() {
    let (_dir, path) = temp_config_path();
    devpod()
        .args(["config", "set", "runtime.engine", "docker"])
        .env("DEVPOD_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set runtime.engine = docker"));

    let content = std::fs::read_to_string(&path).expect("config written");
    assert!(content.contains("engine: docker"), "got: {content}");

    devpod()
        .args(["config", "show"])
        .env("DEVPOD_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("docker"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    devpod()
        .args(["config", "set", "runtime.color", "blue"])
        .env("DEVPOD_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_timeout_fails() {
    let (_dir, path) = temp_config_path();
    devpod()
        .args(["config", "set", "runtime.timeout_secs", "soon"])
        .env("DEVPOD_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("runtime.timeout_secs"));
}

#[cfg(unix)]
#[test]
fn test_config_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = temp_config_path();
    devpod()
        .args(["config", "set", "runtime.timeout_secs", "60"])
        .env("DEVPOD_CONFIG", &path)
        .assert()
        .success();
    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
