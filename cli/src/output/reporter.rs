//! Prints the workspace sequencer's progress events to the terminal.

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// `ProgressReporter` for `devpod build`. Steps, successes, warnings and
/// infos go to stdout unless `--quiet`; details are the `--debug` echo.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.ctx.step(message);
    }

    fn success(&self, message: &str) {
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.ctx.warn(message);
    }

    fn info(&self, message: &str) {
        self.ctx.info(message);
    }

    fn detail(&self, message: &str) {
        self.ctx.debug(message);
    }
}
