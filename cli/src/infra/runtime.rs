//! Infrastructure implementation of the `ContainerRuntime` port.
//!
//! `CliRuntime<R>` renders each `RuntimeCommand` for the configured programs
//! and routes it through a `CommandRunner`. A non-zero exit becomes
//! `DevpodError::RuntimeInvocationFailed`.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ContainerRuntime, RuntimeOutput};
use crate::domain::error::DevpodError;
use crate::domain::runtime::{RuntimeCommand, RuntimePrograms, render_argv};
use crate::infra::command_runner::TokioCommandRunner;

/// Container runtime driven through its command-line programs.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct CliRuntime<R: CommandRunner> {
    runner: R,
    programs: RuntimePrograms,
}

impl<R: CommandRunner> CliRuntime<R> {
    pub fn new(runner: R, programs: RuntimePrograms) -> Self {
        Self { runner, programs }
    }
}

impl CliRuntime<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn with_timeout(programs: RuntimePrograms, timeout: std::time::Duration) -> Self {
        Self::new(TokioCommandRunner::new(timeout), programs)
    }
}

impl<R: CommandRunner> ContainerRuntime for CliRuntime<R> {
    fn programs(&self) -> &RuntimePrograms {
        &self.programs
    }

    async fn execute(&self, command: &RuntimeCommand) -> Result<RuntimeOutput> {
        let argv = command.argv(&self.programs);
        let Some((program, rest)) = argv.split_first() else {
            anyhow::bail!("empty command line for {}", command.label());
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        let output = self
            .runner
            .run(program, &args)
            .await
            .with_context(|| format!("{program} {}", command.label()))?;

        if !output.status.success() {
            return Err(DevpodError::RuntimeInvocationFailed {
                command: render_argv(&argv),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(RuntimeOutput {
            stdout: output.stdout,
        })
    }
}
