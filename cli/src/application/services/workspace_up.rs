//! Application service: bring a workspace up from its descriptor.
//!
//! The run is a fixed sequence of stages:
//!
//! ```text
//! Idle → ConfigLoaded → {SingleContainer | PodComposed}
//!      → PrimaryContainerResolved → PostCreateComplete → PortsReported → Done
//! ```
//!
//! Every runtime call goes through [`ContainerRuntime::execute`] and is awaited
//! before the next one starts. The first failing call aborts the run; nothing
//! is rolled back; the next run's teardown removes whatever was left behind.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{
    ContainerRuntime, ProgressReporter, RuntimeOutput, UrlOpener, WorkspaceFs,
};
use crate::application::services::descriptor_loader::{load_compose, load_descriptor};
use crate::domain::buildconfig::{BUILDCONFIG_FILE, BuildConfig};
use crate::domain::compose::{INJECTED_WORKSPACE_PATH, RewriteOutcome};
use crate::domain::descriptor::{BuildPlan, WorkspaceDescriptor};
use crate::domain::error::DevpodError;
use crate::domain::pod::{
    MemberMounts, parse_mount_destinations, parse_pod_members, select_primary,
};
use crate::domain::port_mapping::{PortMapping, parse_port_output};
use crate::domain::project::ProjectIdentity;
use crate::domain::runtime::{RuntimeCommand, render_argv};

// ── Stages ────────────────────────────────────────────────────────────────────

/// Named states of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ConfigLoaded,
    SingleContainer,
    PodComposed,
    PrimaryContainerResolved,
    PostCreateComplete,
    PortsReported,
    Done,
}

impl Stage {
    /// Stages reachable from `self`.
    #[must_use]
    pub fn successors(self) -> &'static [Stage] {
        match self {
            Self::Idle => &[Self::ConfigLoaded],
            Self::ConfigLoaded => &[Self::SingleContainer, Self::PodComposed],
            Self::SingleContainer | Self::PodComposed => &[Self::PrimaryContainerResolved],
            Self::PrimaryContainerResolved => &[Self::PostCreateComplete],
            Self::PostCreateComplete => &[Self::PortsReported],
            Self::PortsReported => &[Self::Done],
            Self::Done => &[],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ConfigLoaded => "config loaded",
            Self::SingleContainer => "single container",
            Self::PodComposed => "pod composed",
            Self::PrimaryContainerResolved => "primary container resolved",
            Self::PostCreateComplete => "post-create complete",
            Self::PortsReported => "ports reported",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Tracks the current stage and rejects transitions the sequence does not allow.
struct StageTracker<'a, P: ProgressReporter> {
    current: Stage,
    history: Vec<Stage>,
    reporter: &'a P,
}

impl<'a, P: ProgressReporter> StageTracker<'a, P> {
    fn new(reporter: &'a P) -> Self {
        Self {
            current: Stage::Idle,
            history: vec![Stage::Idle],
            reporter,
        }
    }

    fn advance(&mut self, next: Stage) -> Result<()> {
        anyhow::ensure!(
            self.current.successors().contains(&next),
            "invalid stage transition: {} -> {next}",
            self.current
        );
        self.current = next;
        self.history.push(next);
        self.reporter.detail(&format!("stage: {next}"));
        Ok(())
    }
}

// ── Options and outcome ───────────────────────────────────────────────────────

/// Inputs of one run.
pub struct UpOptions<'a> {
    /// Project root holding `.devcontainer/`.
    pub project_dir: &'a Path,
    /// Open every discovered URL in the default browser.
    pub open_browser: bool,
}

/// Outcome of the `up_workspace` use-case.
#[derive(Debug)]
pub struct UpOutcome {
    pub project: ProjectIdentity,
    /// Container that received `exec` and `port` commands.
    pub target: String,
    pub podded: bool,
    pub post_create_ran: bool,
    pub ports: Vec<PortMapping>,
    /// URLs handed to the browser.
    pub opened: Vec<String>,
    /// Path of the exported build configuration.
    pub buildconfig: PathBuf,
    /// Stages passed through, `Idle` first.
    pub stages: Vec<Stage>,
}

// ── Use-case ──────────────────────────────────────────────────────────────────

/// Build (or compose) the workspace for `opts.project_dir` and bring it up.
///
/// Accepts port trait bounds so the caller can inject real or mock
/// implementations. The service never touches `OutputContext` or any
/// presentation type.
///
/// # Errors
///
/// Returns [`DevpodError::NotFound`] / [`DevpodError::MalformedDescriptor`]
/// before any runtime call when the descriptor, the compose file it names or
/// its Dockerfile cannot be loaded, and
/// [`DevpodError::RuntimeInvocationFailed`] for the first failing runtime call.
pub async fn up_workspace(
    runtime: &impl ContainerRuntime,
    fs: &impl WorkspaceFs,
    opener: &impl UrlOpener,
    reporter: &impl ProgressReporter,
    opts: &UpOptions<'_>,
) -> Result<UpOutcome> {
    let project_dir = opts.project_dir;
    let mut stages = StageTracker::new(reporter);

    let descriptor = load_descriptor(fs, project_dir)?;
    let project = ProjectIdentity::from_dir(project_dir).with_context(|| {
        format!("cannot derive a project name from {}", project_dir.display())
    })?;
    stages.advance(Stage::ConfigLoaded)?;
    if let Some(name) = &descriptor.name {
        reporter.info(&format!("workspace '{name}' ({project})"));
    }

    let target = match &descriptor.plan {
        BuildPlan::Dockerfile { .. } => {
            stages.advance(Stage::SingleContainer)?;
            build_single_container(runtime, fs, reporter, &project, &descriptor, project_dir)
                .await?;
            project.to_string()
        }
        BuildPlan::Compose { file, service } => {
            stages.advance(Stage::PodComposed)?;
            let compose = ComposeRequest {
                file,
                service,
                workspace_folder: &descriptor.workspace_folder,
                project_dir,
            };
            compose_pod(runtime, fs, reporter, &project, &compose).await?;
            resolve_primary_container(runtime, reporter, &project).await?
        }
    };
    stages.advance(Stage::PrimaryContainerResolved)?;

    let post_create_ran = run_post_create(runtime, reporter, &descriptor, &target).await?;
    stages.advance(Stage::PostCreateComplete)?;

    let ports = query_ports(runtime, reporter, &target).await?;
    let opened = if opts.open_browser {
        open_urls(opener, reporter, &ports).await
    } else {
        Vec::new()
    };
    stages.advance(Stage::PortsReported)?;

    let buildconfig = export_buildconfig(runtime, fs, &project, &target, project_dir)?;
    stages.advance(Stage::Done)?;

    Ok(UpOutcome {
        project,
        target,
        podded: descriptor.is_podded(),
        post_create_ran,
        ports,
        opened,
        buildconfig,
        stages: stages.history,
    })
}

// ── Runtime helpers ───────────────────────────────────────────────────────────

async fn invoke(
    runtime: &impl ContainerRuntime,
    reporter: &impl ProgressReporter,
    command: &RuntimeCommand,
) -> Result<RuntimeOutput> {
    reporter.detail(&format!("$ {}", render_argv(&command.argv(runtime.programs()))));
    let output = runtime.execute(command).await?;
    let text = output.text();
    if !text.is_empty() {
        reporter.detail(&text);
    }
    Ok(output)
}

/// Remove a container or pod, treating "does not exist" as success.
async fn teardown(
    runtime: &impl ContainerRuntime,
    reporter: &impl ProgressReporter,
    command: &RuntimeCommand,
) -> Result<()> {
    match invoke(runtime, reporter, command).await {
        Ok(_) => Ok(()),
        Err(e)
            if e.downcast_ref::<DevpodError>()
                .is_some_and(DevpodError::is_not_found) =>
        {
            reporter.detail("nothing to remove");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

// ── Single container ──────────────────────────────────────────────────────────

async fn build_single_container(
    runtime: &impl ContainerRuntime,
    fs: &impl WorkspaceFs,
    reporter: &impl ProgressReporter,
    project: &ProjectIdentity,
    descriptor: &WorkspaceDescriptor,
    project_dir: &Path,
) -> Result<()> {
    let BuildPlan::Dockerfile {
        dockerfile,
        context,
        args,
    } = &descriptor.plan
    else {
        anyhow::bail!("single-container build requires a Dockerfile");
    };
    let name = project.to_string();
    if !fs.exists(dockerfile) {
        return Err(DevpodError::NotFound {
            path: dockerfile.clone(),
        }
        .into());
    }

    reporter.step(&format!("removing previous container '{name}'..."));
    teardown(runtime, reporter, &RuntimeCommand::RemoveContainer { name: name.clone() }).await?;

    reporter.step(&format!("building image from {}...", dockerfile.display()));
    let built = invoke(
        runtime,
        reporter,
        &RuntimeCommand::Build {
            tag: name.clone(),
            dockerfile: dockerfile.clone(),
            context: context.clone(),
            args: args.clone(),
        },
    )
    .await?;
    let image = image_id(&built).unwrap_or_else(|| name.clone());
    reporter.success(&format!("image built ({image})"));

    reporter.step("starting container...");
    invoke(
        runtime,
        reporter,
        &RuntimeCommand::Run {
            name: name.clone(),
            image,
            mount_source: project_dir.to_path_buf(),
            mount_target: descriptor.workspace_folder.clone(),
        },
    )
    .await?;
    reporter.success(&format!(
        "container '{name}' started, project mounted at {}",
        descriptor.workspace_folder
    ));
    Ok(())
}

/// The image ID is the last non-empty line a build prints.
fn image_id(output: &RuntimeOutput) -> Option<String> {
    output
        .text()
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(str::to_owned)
}

// ── Pod ───────────────────────────────────────────────────────────────────────

struct ComposeRequest<'a> {
    file: &'a Path,
    service: &'a str,
    workspace_folder: &'a str,
    project_dir: &'a Path,
}

async fn compose_pod(
    runtime: &impl ContainerRuntime,
    fs: &impl WorkspaceFs,
    reporter: &impl ProgressReporter,
    project: &ProjectIdentity,
    req: &ComposeRequest<'_>,
) -> Result<()> {
    let name = project.to_string();

    let compose = load_compose(fs, req.file)?;
    let (rewritten, outcome) =
        compose.inject_workspace_mount(req.project_dir, req.workspace_folder, req.service);
    match outcome {
        RewriteOutcome::Injected(service) => reporter.detail(&format!(
            "mounting project at {INJECTED_WORKSPACE_PATH} in service '{service}'"
        )),
        RewriteOutcome::AlreadyPresent(service) => reporter.detail(&format!(
            "service '{service}' already mounts {INJECTED_WORKSPACE_PATH}"
        )),
        RewriteOutcome::NoMatch => reporter.warn(&format!(
            "no service in {} mounts {}; project source will not be injected",
            req.file.display(),
            req.workspace_folder
        )),
    }

    let yaml = rewritten
        .to_yaml()
        .context("serializing rewritten compose file")?;

    reporter.step(&format!("removing previous pod '{name}'..."));
    teardown(runtime, reporter, &RuntimeCommand::RemovePod { name: name.clone() }).await?;

    let dir = req.file.parent().unwrap_or(req.project_dir);
    let (compose_path, _compose_guard) = fs
        .write_transient(dir, &yaml)
        .context("writing transient compose file")?;

    reporter.step(&format!("composing pod '{name}'..."));
    invoke(
        runtime,
        reporter,
        &RuntimeCommand::ComposeUp {
            project: name.clone(),
            file: compose_path,
        },
    )
    .await?;
    reporter.success(&format!("pod '{name}' started"));
    Ok(())
}

/// Find the pod member that mounts the injected workspace path.
///
/// Falls back to the project identity, with a warning, when none does.
async fn resolve_primary_container(
    runtime: &impl ContainerRuntime,
    reporter: &impl ProgressReporter,
    project: &ProjectIdentity,
) -> Result<String> {
    let pod = project.to_string();
    reporter.step("locating workspace container...");

    let inspected = invoke(runtime, reporter, &RuntimeCommand::InspectPod { name: pod.clone() })
        .await?;
    let members = parse_pod_members(&inspected.stdout).context("parsing pod inspect output")?;

    let mut candidates = Vec::with_capacity(members.len());
    for member in members {
        let output = invoke(
            runtime,
            reporter,
            &RuntimeCommand::InspectContainer {
                name: member.target().to_string(),
            },
        )
        .await?;
        let destinations = parse_mount_destinations(&output.stdout)
            .with_context(|| format!("parsing container inspect output for {}", member.target()))?;
        candidates.push(MemberMounts {
            member,
            destinations,
        });
    }

    if let Some(primary) = select_primary(&candidates, INJECTED_WORKSPACE_PATH) {
        let target = primary.target().to_string();
        reporter.success(&format!("workspace container is '{target}'"));
        return Ok(target);
    }
    reporter.warn(&DevpodError::PrimaryContainerUnresolved { pod: pod.clone() }.to_string());
    Ok(pod)
}

// ── Post-create and ports ─────────────────────────────────────────────────────

async fn run_post_create(
    runtime: &impl ContainerRuntime,
    reporter: &impl ProgressReporter,
    descriptor: &WorkspaceDescriptor,
    target: &str,
) -> Result<bool> {
    let Some(command) = &descriptor.post_create else {
        reporter.info("no postCreateCommand declared, skipping");
        return Ok(false);
    };
    reporter.step("running postCreateCommand...");
    invoke(
        runtime,
        reporter,
        &RuntimeCommand::Exec {
            target: target.to_string(),
            workdir: descriptor.workspace_folder.clone(),
            argv: command.argv(),
        },
    )
    .await?;
    reporter.success("postCreateCommand finished");
    Ok(true)
}

async fn query_ports(
    runtime: &impl ContainerRuntime,
    reporter: &impl ProgressReporter,
    target: &str,
) -> Result<Vec<PortMapping>> {
    let output = invoke(
        runtime,
        reporter,
        &RuntimeCommand::Port {
            target: target.to_string(),
        },
    )
    .await?;
    Ok(parse_port_output(&output.text()))
}

/// Open every URL; a browser failure is a warning, never fatal.
async fn open_urls(
    opener: &impl UrlOpener,
    reporter: &impl ProgressReporter,
    ports: &[PortMapping],
) -> Vec<String> {
    let mut opened = Vec::new();
    for url in ports.iter().filter_map(PortMapping::url) {
        match opener.open(&url).await {
            Ok(()) => opened.push(url),
            Err(e) => reporter.warn(&format!("could not open {url}: {e:#}")),
        }
    }
    opened
}

fn export_buildconfig(
    runtime: &impl ContainerRuntime,
    fs: &impl WorkspaceFs,
    project: &ProjectIdentity,
    target: &str,
    project_dir: &Path,
) -> Result<PathBuf> {
    let homedir = fs.home_dir()?;
    let rendered = BuildConfig {
        project: project.as_str(),
        homedir: &homedir,
        container_id: target,
        engine: &runtime.programs().engine,
    }
    .render();
    let path = project_dir.join(BUILDCONFIG_FILE);
    fs.write(&path, &rendered)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
