//! Container-runtime command vocabulary.
//!
//! Every runtime interaction is one of these commands; `argv` renders it for
//! the configured programs. Pure functions only; nothing here spawns.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Default container engine program.
pub const DEFAULT_ENGINE: &str = "podman";

/// Default compose program.
pub const DEFAULT_COMPOSE: &str = "podman-compose";

/// Compose networking policy: one pod per project, ports forwarded.
const COMPOSE_POD_POLICY: &str = "--transform_policy=1podfw";

/// Programs the commands are rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePrograms {
    pub engine: String,
    pub compose: String,
}

impl Default for RuntimePrograms {
    fn default() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_string(),
            compose: DEFAULT_COMPOSE.to_string(),
        }
    }
}

/// One container-runtime operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Force-remove a container; succeeds when it does not exist.
    RemoveContainer { name: String },
    /// Force-remove a pod and its containers; succeeds when it does not exist.
    RemovePod { name: String },
    Build {
        tag: String,
        dockerfile: PathBuf,
        context: PathBuf,
        args: BTreeMap<String, String>,
    },
    /// Start a detached container publishing all exposed ports.
    Run {
        name: String,
        image: String,
        mount_source: PathBuf,
        mount_target: String,
    },
    /// Build and start a compose project as a single detached pod.
    ComposeUp { project: String, file: PathBuf },
    InspectPod { name: String },
    InspectContainer { name: String },
    Exec {
        target: String,
        workdir: String,
        argv: Vec<String>,
    },
    Port { target: String },
}

impl RuntimeCommand {
    /// Short operation name, used in progress output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::RemoveContainer { .. } => "remove container",
            Self::RemovePod { .. } => "remove pod",
            Self::Build { .. } => "build",
            Self::Run { .. } => "run",
            Self::ComposeUp { .. } => "compose up",
            Self::InspectPod { .. } => "inspect pod",
            Self::InspectContainer { .. } => "inspect container",
            Self::Exec { .. } => "exec",
            Self::Port { .. } => "port",
        }
    }

    /// Full argument vector, program first.
    #[must_use]
    pub fn argv(&self, programs: &RuntimePrograms) -> Vec<String> {
        let engine = programs.engine.clone();
        match self {
            Self::RemoveContainer { name } => {
                vec![engine, "rm".into(), "--force".into(), "--ignore".into(), name.clone()]
            }
            Self::RemovePod { name } => vec![
                engine,
                "pod".into(),
                "rm".into(),
                "--force".into(),
                "--ignore".into(),
                name.clone(),
            ],
            Self::Build {
                tag,
                dockerfile,
                context,
                args,
            } => {
                let mut argv = vec![
                    engine,
                    "build".into(),
                    "-t".into(),
                    tag.clone(),
                    "-f".into(),
                    dockerfile.display().to_string(),
                ];
                for (key, value) in args {
                    argv.push("--build-arg".into());
                    argv.push(format!("{key}={value}"));
                }
                argv.push(context.display().to_string());
                argv
            }
            Self::Run {
                name,
                image,
                mount_source,
                mount_target,
            } => vec![
                engine,
                "run".into(),
                "--detach".into(),
                "--publish-all".into(),
                "--name".into(),
                name.clone(),
                "--volume".into(),
                format!("{}:{mount_target}:z", mount_source.display()),
                image.clone(),
            ],
            Self::ComposeUp { project, file } => vec![
                programs.compose.clone(),
                "--project-name".into(),
                project.clone(),
                "--file".into(),
                file.display().to_string(),
                COMPOSE_POD_POLICY.into(),
                "up".into(),
                "--detach".into(),
                "--build".into(),
            ],
            Self::InspectPod { name } => vec![engine, "pod".into(), "inspect".into(), name.clone()],
            Self::InspectContainer { name } => {
                vec![engine, "container".into(), "inspect".into(), name.clone()]
            }
            Self::Exec {
                target,
                workdir,
                argv,
            } => {
                let mut full = vec![
                    engine,
                    "exec".into(),
                    "--workdir".into(),
                    workdir.clone(),
                    target.clone(),
                ];
                full.extend(argv.iter().cloned());
                full
            }
            Self::Port { target } => vec![engine, "port".into(), target.clone()],
        }
    }
}

/// Render an argument vector for diagnostics, quoting arguments with spaces.
#[must_use]
pub fn render_argv(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("'{}'", arg.replace('\'', r"'\''"))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for RuntimeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_argv(&self.argv(&RuntimePrograms::default())))
    }
}
