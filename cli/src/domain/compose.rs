//! Compose descriptor rewriting.
//!
//! Pure functions only: no I/O. The document is kept as a `serde_yaml::Value`
//! so keys this module does not understand survive the rewrite untouched.

use std::path::Path;

use serde_yaml::Value;

/// Fixed in-container path where the project source is injected.
///
/// Separate from the workspace folder; the compose-declared mount stays in place.
pub const INJECTED_WORKSPACE_PATH: &str = "/devpodworkspace";

/// A short-syntax volume entry split on `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeSpec<'a> {
    /// Host path or named volume; `None` for an anonymous volume.
    pub source: Option<&'a str>,
    pub destination: &'a str,
    pub options: Option<&'a str>,
}

impl<'a> VolumeSpec<'a> {
    /// Parse `source:destination[:options]` (or a bare `destination`).
    #[must_use]
    pub fn parse(entry: &'a str) -> Self {
        let mut parts = entry.splitn(3, ':');
        let first = parts.next().unwrap_or_default();
        match parts.next() {
            Some(destination) => Self {
                source: Some(first),
                destination,
                options: parts.next(),
            },
            None => Self {
                source: None,
                destination: first,
                options: None,
            },
        }
    }
}

/// Result of [`ComposeDescriptor::inject_workspace_mount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The project mount was appended to this service.
    Injected(String),
    /// This service already carries the injected mount; nothing appended.
    AlreadyPresent(String),
    /// No service mounts the workspace path.
    NoMatch,
}

/// Multi-service compose document.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeDescriptor(Value);

impl ComposeDescriptor {
    /// Parse compose YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML.
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text).map(Self)
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.0)
    }

    /// Service names in declaration order.
    #[must_use]
    pub fn service_names(&self) -> Vec<&str> {
        self.0
            .get("services")
            .and_then(Value::as_mapping)
            .map(|services| services.keys().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Short-syntax volume entries of `service`. Long-form entries are skipped.
    #[must_use]
    pub fn volumes(&self, service: &str) -> Vec<&str> {
        self.0
            .get("services")
            .and_then(|s| s.get(service))
            .and_then(|s| s.get("volumes"))
            .and_then(Value::as_sequence)
            .map(|vols| vols.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn mounts_at(&self, service: &str, destination: &str) -> bool {
        self.volumes(service)
            .into_iter()
            .any(|v| VolumeSpec::parse(v).destination == destination)
    }

    /// The service whose volumes mount `workspace_path`.
    ///
    /// `preferred` wins when it matches; otherwise the first match in
    /// declaration order.
    #[must_use]
    pub fn workspace_service(&self, workspace_path: &str, preferred: &str) -> Option<String> {
        if self.mounts_at(preferred, workspace_path) {
            return Some(preferred.to_string());
        }
        self.service_names()
            .into_iter()
            .find(|name| self.mounts_at(name, workspace_path))
            .map(str::to_owned)
    }

    /// Return a copy with `<project>:/devpodworkspace:z` appended to the
    /// service mounting `workspace_path`.
    ///
    /// No matching service leaves the document unchanged. A service that
    /// already mounts [`INJECTED_WORKSPACE_PATH`] is not touched again.
    #[must_use]
    pub fn inject_workspace_mount(
        &self,
        project_path: &Path,
        workspace_path: &str,
        service: &str,
    ) -> (Self, RewriteOutcome) {
        let mut rewritten = self.clone();
        let Some(target) = self.workspace_service(workspace_path, service) else {
            return (rewritten, RewriteOutcome::NoMatch);
        };
        if self.mounts_at(&target, INJECTED_WORKSPACE_PATH) {
            return (rewritten, RewriteOutcome::AlreadyPresent(target));
        }

        let entry = format!("{}:{INJECTED_WORKSPACE_PATH}:z", project_path.display());
        if let Some(volumes) = rewritten
            .0
            .get_mut("services")
            .and_then(|s| s.get_mut(target.as_str()))
            .and_then(|s| s.get_mut("volumes"))
            .and_then(Value::as_sequence_mut)
        {
            volumes.push(Value::String(entry));
        }
        (rewritten, RewriteOutcome::Injected(target))
    }
}
