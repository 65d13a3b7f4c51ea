//! IDE build-configuration export (`.buildconfig`).
//!
//! A `key=value` file with a single `[default]` section, read by the IDE to
//! build and run inside the workspace container.

use std::path::Path;

/// File name of the export, written at the project root.
pub const BUILDCONFIG_FILE: &str = ".buildconfig";

/// Values substituted into the export.
#[derive(Debug, Clone, Copy)]
pub struct BuildConfig<'a> {
    pub project: &'a str,
    pub homedir: &'a Path,
    pub container_id: &'a str,
    /// Runtime program, e.g. `podman`.
    pub engine: &'a str,
}

impl BuildConfig<'_> {
    /// Render the export.
    #[must_use]
    pub fn render(&self) -> String {
        let entries = [
            ("name", "Default".to_string()),
            ("runtime", format!("{}:{}", self.engine, self.container_id)),
            ("project", self.project.to_string()),
            ("homedir", self.homedir.display().to_string()),
            ("containerid", self.container_id.to_string()),
            ("default", "true".to_string()),
        ];
        let mut out = String::from("[default]\n");
        for (key, value) in entries {
            out.push_str(key);
            out.push('=');
            out.push_str(&value);
            out.push('\n');
        }
        out
    }
}
