//! Domain layer: pure business logic, types, and validation.
//!
//! Nothing here spawns a process or touches the filesystem; descriptors,
//! inspection output and port listings come in as text or bytes.

pub mod buildconfig;
pub mod compose;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod pod;
pub mod port_mapping;
pub mod project;
pub mod runtime;

pub use compose::{ComposeDescriptor, INJECTED_WORKSPACE_PATH, RewriteOutcome};
pub use config::{DevpodConfig, RuntimeConfig, validate_config_key, validate_config_value};
pub use descriptor::{BuildPlan, PostCreateCommand, WorkspaceDescriptor};
pub use error::{ConfigError, DevpodError};
pub use port_mapping::PortMapping;
pub use project::ProjectIdentity;
pub use runtime::{RuntimeCommand, RuntimePrograms};
