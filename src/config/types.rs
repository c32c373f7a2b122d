//! Configuration type definitions.

use crate::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_DEBUG_IMAGES_DIR, DEFAULT_DETECTIONS_DIR, DEFAULT_HABITAT,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Detection data locations and ingestion behavior.
    #[serde(default)]
    pub data: DataConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Site aggregation settings.
    #[serde(default)]
    pub sites: SitesConfig,
}

/// Where detection files and debug images live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DataConfig {
    /// Directory scanned for per-image detection JSON files.
    pub detections_dir: PathBuf,

    /// Directory served under the debug image URL prefix.
    pub debug_images_dir: PathBuf,

    /// What to do with a detection file that cannot be parsed.
    pub on_malformed: MalformedFilePolicy,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            detections_dir: PathBuf::from(DEFAULT_DETECTIONS_DIR),
            debug_images_dir: PathBuf::from(DEFAULT_DEBUG_IMAGES_DIR),
            on_malformed: MalformedFilePolicy::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Site aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SitesConfig {
    /// Habitat label attached to every site.
    pub habitat: String,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            habitat: DEFAULT_HABITAT.to_string(),
        }
    }
}

/// Handling of detection files that fail to parse.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MalformedFilePolicy {
    /// Log the file, leave it out, and keep reading the rest.
    #[default]
    Skip,
    /// Fail the whole read on the first bad file.
    Abort,
}

impl std::fmt::Display for MalformedFilePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

impl std::str::FromStr for MalformedFilePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" | "fail" => Ok(Self::Abort),
            other => Err(format!("unknown malformed file policy: {other}")),
        }
    }
}
