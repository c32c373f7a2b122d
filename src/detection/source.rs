//! Where the query layer gets detection files from.

use super::reader::{DetectionScan, read_detection_dir};
use crate::config::MalformedFilePolicy;
use crate::error::Result;
use std::path::PathBuf;

/// A provider of detection files.
///
/// Implementations return the full set on every call.
pub trait DetectionSource: Send + Sync {
    /// Read every available detection file.
    fn scan(&self) -> Result<DetectionScan>;
}

/// Detection files read from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsDetectionSource {
    dir: PathBuf,
    policy: MalformedFilePolicy,
}

impl FsDetectionSource {
    /// Create a source over `dir`.
    pub fn new(dir: impl Into<PathBuf>, policy: MalformedFilePolicy) -> Self {
        Self {
            dir: dir.into(),
            policy,
        }
    }
}

impl DetectionSource for FsDetectionSource {
    fn scan(&self) -> Result<DetectionScan> {
        read_detection_dir(&self.dir, self.policy)
    }
}
