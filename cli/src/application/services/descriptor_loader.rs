//! Application service: read the workspace and compose descriptors.
//!
//! File access goes through the `WorkspaceFs` port; parsing is delegated to
//! `crate::domain`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::WorkspaceFs;
use crate::domain::compose::ComposeDescriptor;
use crate::domain::descriptor::{
    DESCRIPTOR_DIR, DESCRIPTOR_FILE, WorkspaceDescriptor, parse_descriptor,
};
use crate::domain::error::DevpodError;

/// Location of the workspace descriptor for `project_dir`.
#[must_use]
pub fn descriptor_path(project_dir: &Path) -> PathBuf {
    project_dir.join(DESCRIPTOR_DIR).join(DESCRIPTOR_FILE)
}

fn read_existing(fs: &impl WorkspaceFs, path: &Path) -> Result<String> {
    if !fs.exists(path) {
        return Err(DevpodError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    fs.read_to_string(path)
}

/// Load and validate `<project_dir>/.devcontainer/devcontainer.json`.
///
/// # Errors
///
/// Returns [`DevpodError::NotFound`] if the file is absent and
/// [`DevpodError::MalformedDescriptor`] if it cannot be parsed or validated.
pub fn load_descriptor(fs: &impl WorkspaceFs, project_dir: &Path) -> Result<WorkspaceDescriptor> {
    let path = descriptor_path(project_dir);
    let text = read_existing(fs, &path)?;
    Ok(parse_descriptor(&text, &path, project_dir)?)
}

/// Load the compose descriptor referenced by `dockerComposeFile`.
///
/// # Errors
///
/// Returns [`DevpodError::NotFound`] if the file is absent and
/// [`DevpodError::MalformedDescriptor`] if it is not valid YAML.
pub fn load_compose(fs: &impl WorkspaceFs, path: &Path) -> Result<ComposeDescriptor> {
    let text = read_existing(fs, path)?;
    ComposeDescriptor::parse(&text).map_err(|e| {
        DevpodError::MalformedDescriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}
