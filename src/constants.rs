//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "nestwatch";

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default directory holding per-image detection JSON files.
pub const DEFAULT_DETECTIONS_DIR: &str = "outputs/detections";

/// Default directory holding annotated debug images.
pub const DEFAULT_DEBUG_IMAGES_DIR: &str = "outputs/debug";

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5080";

/// Extension of detection files picked up by the reader (compared ASCII case-insensitively).
pub const DETECTION_FILE_EXTENSION: &str = "json";

/// Species label used when a detection carries no name.
pub const UNIDENTIFIED_SPECIES: &str = "Unidentified Bird";

/// Habitat assigned to every site when none is configured.
pub const DEFAULT_HABITAT: &str = "Coastal Habitat";

/// Debug image naming.
pub mod debug_image {
    /// URL prefix under which debug images are served.
    pub const URL_PREFIX: &str = "/images/debug";
    /// Suffix appended to the image identifier.
    pub const SUFFIX: &str = "_debug";
    /// Debug image extension.
    pub const EXTENSION: &str = ".jpg";
}

/// Mean-confidence thresholds for site priority (strictly greater than).
pub mod priority {
    /// Above this the site is high priority.
    pub const HIGH: f64 = 0.8;
    /// Above this (and not high) the site is medium priority.
    pub const MEDIUM: f64 = 0.6;
}

/// Mean-confidence thresholds for verification status (strictly greater than).
pub mod verification {
    /// Above this the site counts as verified.
    pub const VERIFIED: f64 = 0.85;
    /// Above this (and not verified) the site needs review.
    pub const NEEDS_REVIEW: f64 = 0.7;
}

/// Dashboard aggregate constants.
pub mod dashboard {
    /// Number of sites listed in the top-priority ranking.
    pub const TOP_PRIORITY_LIMIT: usize = 5;

    /// Default confidence histogram buckets as `(label, min, max)`, `[min, max)`.
    pub const CONFIDENCE_BUCKETS: &[(&str, f64, f64)] = &[
        ("80-85%", 0.80, 0.85),
        ("85-90%", 0.85, 0.90),
        ("90-95%", 0.90, 0.95),
    ];

    /// Longitude regions as `(name, min_lng, max_lng)`, `[min, max)`.
    pub const REGIONS: &[(&str, f64, f64)] = &[
        ("Western LA", -93.5, -92.0),
        ("Central LA", -92.0, -90.5),
        ("SE Louisiana", -90.5, -89.5),
        ("Eastern LA", -89.5, -88.5),
    ];

    /// Number of species-habitat associations reported.
    pub const TOP_ASSOCIATION_LIMIT: usize = 10;
}

/// Geographic coordinate bounds.
pub mod geo {
    /// Minimum valid latitude.
    pub const MIN_LATITUDE: f64 = -90.0;
    /// Maximum valid latitude.
    pub const MAX_LATITUDE: f64 = 90.0;
    /// Minimum valid longitude.
    pub const MIN_LONGITUDE: f64 = -180.0;
    /// Maximum valid longitude.
    pub const MAX_LONGITUDE: f64 = 180.0;
}
