//! Workspace descriptor (`.devcontainer/devcontainer.json`) parsing.
//!
//! Pure functions only: no I/O, no async. The caller
//! reads the file; this module strips comments, parses, applies defaults and
//! validates once.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::error::DevpodError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Directory holding the descriptor, relative to the project root.
pub const DESCRIPTOR_DIR: &str = ".devcontainer";

/// Descriptor file name inside [`DESCRIPTOR_DIR`].
pub const DESCRIPTOR_FILE: &str = "devcontainer.json";

/// In-container workspace path used when `workspaceFolder` is absent.
pub const DEFAULT_WORKSPACE_FOLDER: &str = "/workspace";

// ── Descriptor schema ────────────────────────────────────────────────────────

/// Command run inside the primary container once it is up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PostCreateCommand {
    /// Run through `sh -c`.
    Shell(String),
    /// Run as an argument vector, no shell.
    Argv(Vec<String>),
}

impl PostCreateCommand {
    /// Argument vector passed to the runtime's `exec`.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        match self {
            Self::Shell(cmd) => vec!["sh".to_string(), "-c".to_string(), cmd.clone()],
            Self::Argv(args) => args.clone(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Shell(cmd) => cmd.trim().is_empty(),
            Self::Argv(args) => args.is_empty(),
        }
    }
}

/// How the workspace container(s) get built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildPlan {
    /// Single container built from a Dockerfile.
    Dockerfile {
        dockerfile: PathBuf,
        context: PathBuf,
        args: BTreeMap<String, String>,
    },
    /// Multi-service pod brought up by the compose tool.
    Compose { file: PathBuf, service: String },
}

/// Typed, validated workspace descriptor with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceDescriptor {
    /// Optional display name.
    pub name: Option<String>,
    pub plan: BuildPlan,
    /// Absolute in-container path where the project is mounted.
    pub workspace_folder: String,
    pub post_create: Option<PostCreateCommand>,
}

impl WorkspaceDescriptor {
    /// Returns `true` when the workspace is a compose-managed pod.
    #[must_use]
    pub fn is_podded(&self) -> bool {
        matches!(self.plan, BuildPlan::Compose { .. })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDescriptor {
    name: Option<String>,
    build: Option<RawBuild>,
    docker_compose_file: Option<String>,
    service: Option<String>,
    workspace_folder: Option<String>,
    post_create_command: Option<PostCreateCommand>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBuild {
    dockerfile: Option<String>,
    context: Option<String>,
    #[serde(default)]
    args: BTreeMap<String, String>,
}

// ── Comment stripping ────────────────────────────────────────────────────────

/// Strip `//` line comments and `/* */` block comments from JSON-with-comments.
///
/// A `//` may start anywhere on a line. Markers inside string literals are
/// kept. Lines left blank after stripping are dropped.
#[must_use]
pub fn strip_comments(text: &str) -> String {
    let mut in_block = false;
    text.lines()
        .map(|line| strip_line(line, &mut in_block))
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line(line: &str, in_block: &mut bool) -> String {
    let mut kept = String::with_capacity(line.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if *in_block {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block = false;
            }
            continue;
        }
        if in_string {
            kept.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match (c, chars.peek()) {
            ('/', Some('/')) => break,
            ('/', Some('*')) => {
                chars.next();
                *in_block = true;
            }
            ('"', _) => {
                in_string = true;
                kept.push(c);
            }
            _ => kept.push(c),
        }
    }
    kept
}

/// Parse JSON-with-comments into an untyped value.
///
/// # Errors
///
/// Returns an error if the stripped text is not valid JSON.
pub fn parse_jsonc(text: &str) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(&strip_comments(text))
}

// ── Typed parsing ────────────────────────────────────────────────────────────

/// Parse descriptor text read from `path` into a [`WorkspaceDescriptor`].
///
/// Relative paths in the descriptor resolve against the descriptor's directory;
/// the default build context is `project_dir`.
///
/// # Errors
///
/// Returns [`DevpodError::MalformedDescriptor`] if the text is not valid JSON,
/// names neither a Dockerfile nor a compose file, or omits `service` for a
/// compose file.
pub fn parse_descriptor(
    text: &str,
    path: &Path,
    project_dir: &Path,
) -> Result<WorkspaceDescriptor, DevpodError> {
    let malformed = |reason: String| DevpodError::MalformedDescriptor {
        path: path.to_path_buf(),
        reason,
    };

    let value = parse_jsonc(text).map_err(|e| malformed(e.to_string()))?;
    let raw = RawDescriptor::deserialize(value).map_err(|e| malformed(e.to_string()))?;
    let descriptor_dir = path.parent().unwrap_or(project_dir);

    let workspace_folder = raw
        .workspace_folder
        .unwrap_or_else(|| DEFAULT_WORKSPACE_FOLDER.to_string());
    if !workspace_folder.starts_with('/') {
        return Err(malformed(format!(
            "workspaceFolder must be an absolute path, got '{workspace_folder}'"
        )));
    }

    let plan = if let Some(file) = raw.docker_compose_file {
        let service = raw
            .service
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| malformed("'service' is required with 'dockerComposeFile'".into()))?;
        BuildPlan::Compose {
            file: descriptor_dir.join(file),
            service,
        }
    } else {
        let build = raw.build.unwrap_or_default();
        let dockerfile = build.dockerfile.ok_or_else(|| {
            malformed("one of 'build.dockerfile' or 'dockerComposeFile' is required".into())
        })?;
        BuildPlan::Dockerfile {
            dockerfile: descriptor_dir.join(dockerfile),
            context: build
                .context
                .map_or_else(|| project_dir.to_path_buf(), |c| descriptor_dir.join(c)),
            args: build.args,
        }
    };

    Ok(WorkspaceDescriptor {
        name: raw.name,
        plan,
        workspace_folder,
        post_create: raw.post_create_command.filter(|c| !c.is_empty()),
    })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
