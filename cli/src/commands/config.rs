//! `devpod config`: show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (runtime.engine, runtime.compose, runtime.timeout_secs)
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, validated or written.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<()> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;
    let out = &app.output;
    out.header("Configuration");
    out.kv("file", &path.display().to_string());
    out.kv("runtime.engine", &config.runtime.engine);
    out.kv("runtime.compose", &config.runtime.compose);
    out.kv("runtime.timeout_secs", &config.runtime.timeout_secs.to_string());
    Ok(())
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<()> {
    config_service::set_value(&app.config_store, key, value)?;
    app.output.success(&format!("Set {key} = {value}"));
    Ok(())
}
