//! Infrastructure implementation of the `UrlOpener` port.
//!
//! Delegates to the platform's URL launcher through a `CommandRunner`.

use anyhow::Result;

use crate::application::ports::{CommandRunner, UrlOpener};
use crate::infra::command_runner::DEFAULT_CMD_TIMEOUT;

/// Opens URLs with `xdg-open`, `open` or `cmd /C start`.
pub struct SystemBrowser<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> SystemBrowser<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

/// Launcher program and leading arguments for the current platform.
fn launcher() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(windows) {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

impl<R: CommandRunner> UrlOpener for SystemBrowser<R> {
    async fn open(&self, url: &str) -> Result<()> {
        let (program, lead) = launcher();
        let mut args: Vec<&str> = lead.to_vec();
        args.push(url);
        let output = self
            .runner
            .run_with_timeout(program, &args, DEFAULT_CMD_TIMEOUT)
            .await?;
        anyhow::ensure!(
            output.status.success(),
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        Ok(())
    }
}
