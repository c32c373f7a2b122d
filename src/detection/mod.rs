//! Detection file ingestion.
//!
//! Reads the per-image JSON files produced by the aerial detector and turns
//! them into typed records.

mod parser;
mod reader;
mod source;
mod types;

pub use parser::{parse_detection_file, parse_detection_str};
pub use reader::{DetectionScan, SkippedFile, collect_detection_files, read_detection_dir};
pub use source::{DetectionSource, FsDetectionSource};
pub use types::{
    BoundingBox, DetectionFileSummary, DetectionRecord, GeoCoordinate, ImageCenter, ImageFile,
};
