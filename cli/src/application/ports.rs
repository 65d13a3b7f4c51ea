//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::config::DevpodConfig;
use crate::domain::runtime::{RuntimeCommand, RuntimePrograms};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Container Runtime Port ────────────────────────────────────────────────────

/// Captured standard output of a successful runtime invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOutput {
    pub stdout: Vec<u8>,
}

impl RuntimeOutput {
    /// Stdout decoded lossily, surrounding whitespace trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }
}

/// The single choke point every container-runtime interaction passes through.
#[allow(async_fn_in_trait)]
pub trait ContainerRuntime {
    /// Programs commands are rendered for.
    fn programs(&self) -> &RuntimePrograms;

    /// Execute one runtime command and capture its stdout.
    ///
    /// # Errors
    ///
    /// A non-zero exit is reported as
    /// [`DevpodError::RuntimeInvocationFailed`](crate::domain::error::DevpodError)
    /// carrying the command line and captured stderr.
    async fn execute(&self, command: &RuntimeCommand) -> Result<RuntimeOutput>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit an informational message.
    fn info(&self, message: &str);
    /// Emit diagnostic detail (command lines, captured output). Shown only in
    /// debug mode.
    fn detail(&self, message: &str);
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the project files the sequencer reads and writes.
pub trait WorkspaceFs {
    /// Returns `true` if `path` exists.
    fn exists(&self, path: &Path) -> bool;
    /// Read a UTF-8 file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Create or overwrite a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Write `content` to a new uniquely named file inside `dir`.
    ///
    /// Returns `(path, guard)`; the file is deleted when `guard` is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    fn write_transient(
        &self,
        dir: &Path,
        content: &str,
    ) -> Result<(PathBuf, Box<dyn std::any::Any>)>;
    /// The user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn home_dir(&self) -> Result<PathBuf>;
}

// ── Browser Port ──────────────────────────────────────────────────────────────

/// Opens URLs in the user's default browser.
#[allow(async_fn_in_trait)]
pub trait UrlOpener {
    /// Open `url`.
    async fn open(&self, url: &str) -> Result<()>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading and saving the user configuration.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<DevpodConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &DevpodConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
