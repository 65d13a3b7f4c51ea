//! Application context: unified state passed to every command handler.
//!
//! The stored configuration is read once here to pick the runtime programs
//! and their timeout; `devpod config` reads it again through the store.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::infra::browser::SystemBrowser;
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalFs;
use crate::infra::runtime::CliRuntime;
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Echo runtime command lines and their output.
    pub debug: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet and debug modes).
    pub output: OutputContext,
    /// Where the user configuration lives.
    pub config_store: YamlConfigStore,
    /// Container runtime rendered for the configured programs.
    pub runtime: CliRuntime<TokioCommandRunner>,
    pub fs: LocalFs,
    pub browser: SystemBrowser<TokioCommandRunner>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn new(flags: &OutputFlags) -> Result<Self> {
        let config_store = YamlConfigStore;
        let config = config_store.load()?;
        let runtime = CliRuntime::with_timeout(config.runtime.programs(), config.runtime.timeout());

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet, flags.debug),
            config_store,
            runtime,
            fs: LocalFs,
            browser: SystemBrowser::new(TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT)),
        })
    }

    /// Progress reporter writing to this context's terminal.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}
