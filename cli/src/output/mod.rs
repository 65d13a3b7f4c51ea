//! Terminal rendering for devpod: progress markers, the build summary and
//! `--debug` echo of runtime invocations.

pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

/// Width the summary keys are padded to, so values line up.
const KEY_WIDTH: usize = 12;

/// Rendering state shared by the progress reporter and command handlers.
pub struct OutputContext {
    pub styles: Styles,
    /// `--quiet`: progress and summary lines are dropped, errors still reach stderr.
    pub quiet: bool,
    /// `--debug`: runtime command lines and captured output go to stderr.
    pub debug: bool,
}

impl OutputContext {
    /// Colors are used only on a terminal, and never with `--no-color` or `NO_COLOR`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool, debug: bool) -> Self {
        let colored = !no_color && Term::stdout().is_term() && std::env::var_os("NO_COLOR").is_none();
        Self {
            styles: if colored { Styles::colored() } else { Styles::default() },
            quiet,
            debug,
        }
    }

    fn marked(&self, marker: &str, style: owo_colors::Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", marker.style(style));
        }
    }

    pub fn success(&self, msg: &str) {
        self.marked("✓", self.styles.success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.marked("⚠", self.styles.warning, msg);
    }

    pub fn info(&self, msg: &str) {
        self.marked("ℹ", self.styles.info, msg);
    }

    pub fn step(&self, msg: &str) {
        self.marked("→", self.styles.step, msg);
    }

    /// Title line of the build summary or `config show`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// One summary row; `key` is dimmed and padded.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", format!("{key:<KEY_WIDTH$}").style(self.styles.dim));
        }
    }

    /// Echo of a runtime invocation, indented under the current step.
    pub fn debug(&self, msg: &str) {
        if !self.debug {
            return;
        }
        for line in msg.lines() {
            eprintln!("    {}", line.style(self.styles.dim));
        }
    }
}
