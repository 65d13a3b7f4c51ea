//! `devpod build`: build the workspace and bring it up.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize as _;

use crate::app::AppContext;
use crate::application::services::workspace_up::{self as service, UpOptions, UpOutcome};
use crate::output::OutputContext;

/// Arguments for the build command.
#[derive(Args, Default)]
pub struct BuildArgs {
    /// Project directory containing `.devcontainer/` (defaults to the current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Open every published URL in the default browser
    #[arg(short, long)]
    pub open: bool,
}

/// Run `devpod build`.
///
/// # Errors
///
/// Returns an error if the descriptor is missing or malformed, or any
/// runtime invocation fails.
pub async fn run(args: &BuildArgs, app: &AppContext) -> Result<()> {
    let project_dir = match &args.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let project_dir = std::path::absolute(&project_dir)
        .with_context(|| format!("cannot resolve {}", project_dir.display()))?;
    let reporter = app.terminal_reporter();

    let outcome = service::up_workspace(
        &app.runtime,
        &app.fs,
        &app.browser,
        &reporter,
        &UpOptions {
            project_dir: &project_dir,
            open_browser: args.open,
        },
    )
    .await?;

    print_summary(&outcome, &app.output);
    Ok(())
}

fn print_summary(outcome: &UpOutcome, ctx: &OutputContext) {
    if ctx.quiet {
        return;
    }
    println!();
    ctx.header(&format!("Workspace '{}' is up", outcome.project));
    ctx.kv("container", &outcome.target);
    if outcome.ports.is_empty() {
        ctx.kv("ports", "no published ports");
    } else {
        for port in &outcome.ports {
            let shown = port.display();
            match port.url() {
                Some(_) => ctx.kv("port", &format!("{}", shown.style(ctx.styles.url))),
                None => ctx.kv("port", &shown),
            }
        }
    }
    ctx.kv("buildconfig", &outcome.buildconfig.display().to_string());
}
