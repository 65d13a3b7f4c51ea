//! Filesystem infrastructure: implements `WorkspaceFs`.

use std::any::Any;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::WorkspaceFs;

const TRANSIENT_PREFIX: &str = ".devpod-compose-";
const TRANSIENT_SUFFIX: &str = ".yml";

/// Production filesystem implementation of `WorkspaceFs`.
pub struct LocalFs;

impl WorkspaceFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("reading file {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).with_context(|| format!("writing file {}", path.display()))
    }

    fn write_transient(&self, dir: &Path, content: &str) -> Result<(PathBuf, Box<dyn Any>)> {
        let mut file = tempfile::Builder::new()
            .prefix(TRANSIENT_PREFIX)
            .suffix(TRANSIENT_SUFFIX)
            .tempfile_in(dir)
            .with_context(|| format!("creating transient file in {}", dir.display()))?;
        let path = file.path().to_path_buf();
        file.write_all(content.as_bytes())
            .and_then(|()| file.flush())
            .with_context(|| format!("writing transient file {}", path.display()))?;
        Ok((path, Box::new(file)))
    }

    fn home_dir(&self) -> Result<PathBuf> {
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
    }
}
