//! Project identity derived from the project directory.

use std::fmt;
use std::path::Path;

/// Name used for the container, the pod and the image tag.
///
/// Not validated against runtime naming rules; an unusable name surfaces as a
/// runtime error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity(String);

impl ProjectIdentity {
    /// Derive the identity from the base name of `project_dir`.
    ///
    /// Returns `None` when the path has no usable base name (e.g. `/`).
    #[must_use]
    pub fn from_dir(project_dir: &Path) -> Option<Self> {
        let name = project_dir.file_name()?.to_string_lossy();
        let name = name.trim();
        (!name.is_empty()).then(|| Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
