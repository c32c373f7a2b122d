//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config_file, save_config};
pub use paths::{config_dir, config_file_path, resolve_config_path};
pub use types::{Config, DataConfig, MalformedFilePolicy, ServerConfig, SitesConfig};
pub use validate::{parse_bind_addr, validate_config};

use std::path::PathBuf;

/// Values from the command line or environment that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Detection JSON directory.
    pub detections_dir: Option<PathBuf>,
    /// Debug image directory.
    pub debug_images_dir: Option<PathBuf>,
    /// Malformed file handling.
    pub on_malformed: Option<MalformedFilePolicy>,
    /// Server bind address.
    pub bind: Option<String>,
}

impl Config {
    /// Apply command line and environment overrides on top of file values.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.detections_dir {
            self.data.detections_dir = dir;
        }
        if let Some(dir) = overrides.debug_images_dir {
            self.data.debug_images_dir = dir;
        }
        if let Some(policy) = overrides.on_malformed {
            self.data.on_malformed = policy;
        }
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_values() {
        let config = Config::default().with_overrides(ConfigOverrides {
            detections_dir: Some(PathBuf::from("/data/detections")),
            on_malformed: Some(MalformedFilePolicy::Abort),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.data.detections_dir, PathBuf::from("/data/detections"));
        assert_eq!(config.data.on_malformed, MalformedFilePolicy::Abort);
        assert_eq!(config.data.debug_images_dir, PathBuf::from("outputs/debug"));
        assert_eq!(config.server.bind, "127.0.0.1:5080");
    }
}
