//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Build and start development containers from `.devcontainer/devcontainer.json`
#[derive(Parser)]
#[command(
    name = "devpod",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Echo every runtime command and its output
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the workspace container (or pod) and start it
    #[command(visible_alias = "up")]
    Build(commands::build::BuildArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            quiet,
            no_color,
            debug,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run();
            return Ok(());
        }

        let app = AppContext::new(&OutputFlags {
            no_color,
            quiet,
            debug,
        })?;
        match command {
            Command::Build(args) => commands::build::run(&args, &app).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => Ok(()),
        }
    }
}
