//! Domain types and validators for devpod configuration.
//!
//! Pure functions only: no I/O, no async.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::runtime::{DEFAULT_COMPOSE, DEFAULT_ENGINE, RuntimePrograms};

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["runtime.engine", "runtime.compose", "runtime.timeout_secs"];

/// Builds can take a while; one runtime invocation may not exceed this by default.
pub const DEFAULT_TIMEOUT_SECS: u64 = 1800;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.devpod/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DevpodConfig {
    /// Container runtime settings.
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Container runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Container engine program (default `podman`).
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Compose program (default `podman-compose`).
    #[serde(default = "default_compose")]
    pub compose: String,
    /// Per-invocation timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            compose: default_compose(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RuntimeConfig {
    /// Programs runtime commands are rendered for.
    #[must_use]
    pub fn programs(&self) -> RuntimePrograms {
        RuntimePrograms {
            engine: self.engine.clone(),
            compose: self.compose.clone(),
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

fn default_compose() -> String {
    DEFAULT_COMPOSE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |hint: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    };
    match key {
        "runtime.engine" | "runtime.compose" if value.trim().is_empty() => {
            Err(invalid("Expected a program name or path").into())
        }
        "runtime.timeout_secs" if !matches!(value.parse::<u64>(), Ok(n) if n > 0) => {
            Err(invalid("Expected a positive number of seconds").into())
        }
        _ => Ok(()),
    }
}

/// Apply a validated `key = value` to `config`.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value is invalid.
pub fn apply_config_value(config: &mut DevpodConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "runtime.engine" => config.runtime.engine = value.to_string(),
        "runtime.compose" => config.runtime.compose = value.to_string(),
        "runtime.timeout_secs" => config.runtime.timeout_secs = value.parse()?,
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
