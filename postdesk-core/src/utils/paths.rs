//! Application-Specific Path Resolution.
//!
//! Resolves the per-user configuration and data directories for Postdesk
//! following platform conventions (XDG on Linux) through `directories-next`.
//!
//! - [`get_app_config_dir()`]: e.g. `~/.config/postdesk`.
//! - [`get_app_data_dir()`]: e.g. `~/.local/share/postdesk`.
//!
//! Both return [`CoreError::Config(ConfigError::DirectoryUnavailable)`] when
//! no home directory can be determined.

use crate::error::{ConfigError, CoreError};
use directories_next::ProjectDirs;
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Postdesk";
const APPLICATION: &str = "postdesk";

fn project_dirs(dir_type: &str) -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: dir_type.to_string(),
        })
    })
}

/// Returns the application-specific configuration directory.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Config").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the application-specific data directory, where the durable
/// notification snapshot lives by default.
pub fn get_app_data_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Data").map(|dirs| dirs.data_dir().to_path_buf())
}
