//! `~/.devpod/config.yaml`: runtime program names and the build timeout.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::DevpodConfig;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "DEVPOD_CONFIG";

/// Reads and writes the YAML settings file. An absent or blank file means
/// podman with the default timeout.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<DevpodConfig> {
        let path = self.path()?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DevpodConfig::default()),
            Err(e) => return Err(e).with_context(|| format!("cannot read {}", path.display())),
        };
        if content.trim().is_empty() {
            return Ok(DevpodConfig::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse devpod settings in {}", path.display()))
    }

    fn save(&self, config: &DevpodConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }
        let yaml = serde_yaml::to_string(config).context("cannot serialize devpod settings")?;
        std::fs::write(&path, yaml).with_context(|| format!("cannot write {}", path.display()))?;
        owner_only(&path)
    }

    fn path(&self) -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Ok(PathBuf::from(path)),
            None => dirs::home_dir()
                .map(|home| home.join(".devpod").join("config.yaml"))
                .context("cannot determine home directory for ~/.devpod/config.yaml"),
        }
    }
}

#[cfg(unix)]
fn owner_only(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("cannot restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn owner_only(_path: &Path) -> Result<()> {
    Ok(())
}
