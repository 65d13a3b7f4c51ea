//! Pod and container inspection parsing, primary-container selection.
//!
//! Pure functions only: inspection JSON comes in as bytes.

use serde::Deserialize;
use serde_json::Value;

/// A container belonging to a pod, as listed by `pod inspect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PodMember {
    pub id: String,
    pub name: String,
}

impl PodMember {
    /// Name usable as a runtime command target (name, falling back to ID).
    #[must_use]
    pub fn target(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}

/// A pod member together with the mount destinations it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberMounts {
    pub member: PodMember,
    pub destinations: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct PodInspect {
    containers: Vec<PodMember>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ContainerInspect {
    mounts: Vec<Mount>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct Mount {
    destination: String,
}

/// Normalise inspect output: newer runtimes wrap the object in an array.
fn inspect_objects(json: &[u8]) -> Result<Vec<Value>, serde_json::Error> {
    Ok(match serde_json::from_slice::<Value>(json)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    })
}

/// Parse `pod inspect` output into its member containers.
///
/// # Errors
///
/// Returns an error if the output is not valid JSON of the expected shape.
pub fn parse_pod_members(json: &[u8]) -> Result<Vec<PodMember>, serde_json::Error> {
    let mut members = Vec::new();
    for pod in inspect_objects(json)? {
        members.extend(PodInspect::deserialize(pod)?.containers);
    }
    Ok(members)
}

/// Parse `container inspect` output into mount destinations.
///
/// # Errors
///
/// Returns an error if the output is not valid JSON of the expected shape.
pub fn parse_mount_destinations(json: &[u8]) -> Result<Vec<String>, serde_json::Error> {
    let mut destinations = Vec::new();
    for container in inspect_objects(json)? {
        let inspect = ContainerInspect::deserialize(container)?;
        destinations.extend(inspect.mounts.into_iter().map(|m| m.destination));
    }
    Ok(destinations)
}

/// The first member with a mount at `destination`, wherever it sits in the list.
#[must_use]
pub fn select_primary<'a>(members: &'a [MemberMounts], destination: &str) -> Option<&'a PodMember> {
    members
        .iter()
        .find(|m| m.destinations.iter().any(|d| d == destination))
        .map(|m| &m.member)
}
