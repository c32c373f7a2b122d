//! Detection directory scanning.

use super::parser::parse_detection_file;
use super::types::ImageFile;
use crate::config::MalformedFilePolicy;
use crate::constants::DETECTION_FILE_EXTENSION;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A detection file left out of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Why the file could not be used.
    pub reason: String,
}

/// Result of reading a detection directory.
#[derive(Debug, Clone, Default)]
pub struct DetectionScan {
    /// Successfully parsed files, in directory enumeration order.
    pub files: Vec<ImageFile>,
    /// Files that failed to parse (only populated with [`MalformedFilePolicy::Skip`]).
    pub skipped: Vec<SkippedFile>,
}

/// Read and parse every detection file directly inside `dir`.
///
/// The directory is re-scanned on every call; nothing is cached.
///
/// # Errors
///
/// - [`Error::DetectionDirNotFound`] if `dir` does not exist or is not a directory
/// - [`Error::DetectionDirRead`] if the directory cannot be listed
/// - any parse error when `policy` is [`MalformedFilePolicy::Abort`]
pub fn read_detection_dir(dir: &Path, policy: MalformedFilePolicy) -> Result<DetectionScan> {
    let paths = collect_detection_files(dir)?;
    debug!(
        "Found {} detection file(s) in {}",
        paths.len(),
        dir.display()
    );

    let mut scan = DetectionScan::default();

    for path in paths {
        match parse_detection_file(&path) {
            Ok(file) => scan.files.push(file),
            Err(e) if policy == MalformedFilePolicy::Skip => {
                let reason = e.chain_message();
                warn!("Skipping detection file {}: {}", path.display(), reason);
                scan.skipped.push(SkippedFile { path, reason });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(scan)
}

/// List detection files directly inside `dir` (non-recursive).
pub fn collect_detection_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::DetectionDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let read_err = |e| Error::DetectionDirRead {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_detection_file(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Check if a path has the detection file extension.
fn is_detection_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new(DETECTION_FILE_EXTENSION)))
}
