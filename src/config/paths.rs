//! Where the configuration file lives.

use crate::constants::{APP_NAME, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Platform configuration directory for nestwatch.
///
/// - Linux: `~/.config/nestwatch/`
/// - macOS: `~/Library/Application Support/nestwatch/`
/// - Windows: `%APPDATA%\nestwatch\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Default configuration file inside [`config_dir`].
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// The file named by `--config` / `NESTWATCH_CONFIG`, else the platform default.
///
/// An explicit path is used as given and never requires a home directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    explicit.map_or_else(config_file_path, |path| Ok(path.to_path_buf()))
}
