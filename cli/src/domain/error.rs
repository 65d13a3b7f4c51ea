//! Typed domain errors.
//!
//! Each converts to `anyhow::Error` through `?` and stays downcastable, so the
//! sequencer can tell a missing container apart from a real failure.

use std::path::PathBuf;

use thiserror::Error;

// ── Workspace errors ──────────────────────────────────────────────────────────

/// Errors raised while resolving and orchestrating a workspace.
#[derive(Debug, Error)]
pub enum DevpodError {
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed descriptor {}: {reason}", path.display())]
    MalformedDescriptor { path: PathBuf, reason: String },

    #[error("Command failed{}: {command}\n{stderr}", exit_code_suffix(*code))]
    RuntimeInvocationFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Soft failure: reported as a warning, the sequencer falls back to the pod name.
    #[error("No container in pod '{pod}' mounts the project workspace; using '{pod}' as target")]
    PrimaryContainerUnresolved { pod: String },
}

impl DevpodError {
    /// Returns `true` when a runtime failure reports a missing container or pod.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::RuntimeInvocationFailed { stderr, .. } => {
                let stderr = stderr.to_lowercase();
                stderr.contains("no such")
                    || stderr.contains("no container with name")
                    || stderr.contains("no pod with name")
            }
            _ => false,
        }
    }
}

fn exit_code_suffix(code: Option<i32>) -> String {
    code.map_or_else(|| " (terminated by signal)".to_string(), |c| format!(" (exit {c})"))
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
