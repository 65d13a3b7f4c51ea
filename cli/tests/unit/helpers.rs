//! Shared test helpers: mock runtime, reporter, opener and project fixtures.

#![allow(dead_code, clippy::expect_used)]

use std::any::Any;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use devpod::application::ports::{
    ConfigStore, ContainerRuntime, ProgressReporter, RuntimeOutput, UrlOpener, WorkspaceFs,
};
use devpod::domain::config::DevpodConfig;
use devpod::domain::error::DevpodError;
use devpod::domain::runtime::{RuntimeCommand, RuntimePrograms, render_argv};
use devpod::infra::fs::LocalFs;
use tempfile::TempDir;

// ── Runtime ──────────────────────────────────────────────────────────────────

type Responder = Box<dyn Fn(&RuntimeCommand) -> Result<RuntimeOutput> + Send + Sync>;

/// Records every command and answers through a caller-supplied responder.
pub struct MockRuntime {
    programs: RuntimePrograms,
    responder: Responder,
    pub calls: Mutex<Vec<RuntimeCommand>>,
}

impl MockRuntime {
    pub fn new(
        responder: impl Fn(&RuntimeCommand) -> Result<RuntimeOutput> + Send + Sync + 'static,
    ) -> Self {
        Self {
            programs: RuntimePrograms::default(),
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every command succeeds with empty output.
    pub fn ok() -> Self {
        Self::new(|_| Ok(RuntimeOutput::default()))
    }

    pub fn calls(&self) -> Vec<RuntimeCommand> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.calls().iter().map(RuntimeCommand::label).collect()
    }
}

impl ContainerRuntime for MockRuntime {
    fn programs(&self) -> &RuntimePrograms {
        &self.programs
    }

    async fn execute(&self, command: &RuntimeCommand) -> Result<RuntimeOutput> {
        self.calls.lock().expect("lock").push(command.clone());
        (self.responder)(command)
    }
}

pub fn stdout(text: &str) -> Result<RuntimeOutput> {
    Ok(RuntimeOutput {
        stdout: text.as_bytes().to_vec(),
    })
}

/// A runtime failure shaped like the production adapter reports it.
pub fn runtime_failure(command: &RuntimeCommand, stderr: &str) -> Result<RuntimeOutput> {
    Err(DevpodError::RuntimeInvocationFailed {
        command: render_argv(&command.argv(&RuntimePrograms::default())),
        code: Some(125),
        stderr: stderr.to_string(),
    }
    .into())
}

// ── Filesystem ───────────────────────────────────────────────────────────────

/// Real filesystem with a fixed home directory.
pub struct ProjectFs {
    pub home: PathBuf,
}

impl ProjectFs {
    pub fn new() -> Self {
        Self {
            home: PathBuf::from("/home/dev"),
        }
    }
}

impl WorkspaceFs for ProjectFs {
    fn exists(&self, path: &Path) -> bool {
        LocalFs.exists(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        LocalFs.read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        LocalFs.write(path, content)
    }

    fn write_transient(&self, dir: &Path, content: &str) -> Result<(PathBuf, Box<dyn Any>)> {
        LocalFs.write_transient(dir, content)
    }

    fn home_dir(&self) -> Result<PathBuf> {
        Ok(self.home.clone())
    }
}

// ── Reporter ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Step,
    Success,
    Warn,
    Info,
    Detail,
}

/// Collects every progress event.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        self.events.borrow_mut().push((level, message.to_string()));
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push(Level::Step, message);
    }
    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }
    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }
    fn detail(&self, message: &str) {
        self.push(Level::Detail, message);
    }
}

// ── Browser ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingOpener {
    pub fail: bool,
    pub opened: RefCell<Vec<String>>,
}

impl UrlOpener for RecordingOpener {
    async fn open(&self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            anyhow::bail!("xdg-open: no method available for opening '{url}'");
        }
        Ok(())
    }
}

// ── Config store ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryConfigStore {
    pub stored: RefCell<Option<DevpodConfig>>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<DevpodConfig> {
        Ok(self.stored.borrow().clone().unwrap_or_default())
    }

    fn save(&self, config: &DevpodConfig) -> Result<()> {
        *self.stored.borrow_mut() = Some(config.clone());
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/home/dev/.devpod/config.yaml"))
    }
}

// ── Project fixtures ─────────────────────────────────────────────────────────

/// A temporary project directory named `name` with the given files.
pub struct Project {
    _root: TempDir,
    pub dir: PathBuf,
}

impl Project {
    pub fn new(name: &str, files: &[(&str, &str)]) -> Self {
        let root = TempDir::new().expect("temp dir");
        let dir = root.path().join(name);
        std::fs::create_dir_all(dir.join(".devcontainer")).expect("create .devcontainer");
        for (rel, content) in files {
            let path = dir.join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("create parent");
            }
            std::fs::write(path, content).expect("write fixture");
        }
        Self { _root: root, dir }
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.join(rel)).expect("read project file")
    }

    /// Files in `.devcontainer/` other than the given fixtures.
    pub fn devcontainer_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.join(".devcontainer"))
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub const DOCKERFILE_DESCRIPTOR: &str = r#"{
    // single container
    "name": "Demo",
    "build": { "dockerfile": "Dockerfile" },
    "postCreateCommand": "echo hi"
}"#;

pub const COMPOSE_DESCRIPTOR: &str = r#"{
    "name": "Demo pod",
    /* the app service mounts the sources */
    "dockerComposeFile": "docker-compose.yml",
    "service": "app",
    "workspaceFolder": "/workspace"
}"#;

pub const COMPOSE_FILE: &str = "services:
  db:
    image: postgres
  app:
    build: .
    volumes:
      - ..:/workspace:cached
";
