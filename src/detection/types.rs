//! Detection file record types.

use crate::constants::geo::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Pixel bounding box of a detection.
///
/// No ordering between min and max is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub xmin: f64,
    /// Top edge.
    pub ymin: f64,
    /// Right edge.
    pub xmax: f64,
    /// Bottom edge.
    pub ymax: f64,
}

impl From<[f64; 4]> for BoundingBox {
    fn from([xmin, ymin, xmax, ymax]: [f64; 4]) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }
}

/// A single AI detection within an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRecord {
    /// Species label, or the unidentified placeholder.
    pub species: String,
    /// Model confidence, nominally 0.0-1.0 but not validated.
    pub confidence: f64,
    /// Detection bounding box in image pixels.
    pub bounding_box: BoundingBox,
}

/// Center coordinate of an aerial image as written by the detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageCenter {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl ImageCenter {
    /// Validate the raw center as a geographic coordinate.
    pub fn to_coordinate(self) -> Result<GeoCoordinate> {
        GeoCoordinate::new(self.lat, self.lon)
    }
}

/// A latitude/longitude pair known to be within range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(Error::InvalidLatitude { value: latitude });
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(Error::InvalidLongitude { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// One parsed detection file: a single processed aerial image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    /// Image identifier, unique per file by convention only.
    pub image_id: String,
    /// Image center coordinate.
    pub center: ImageCenter,
    /// Detections in file order.
    pub detections: Vec<DetectionRecord>,
    /// File the record was read from.
    pub source_path: PathBuf,
}

/// Less-aggregated per-image view served by the detections endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionFileSummary {
    /// Image identifier.
    pub image_id: String,
    /// Image center coordinate.
    pub image_center: ImageCenter,
    /// Number of detections in the file.
    pub detection_count: usize,
    /// All detections in file order.
    pub detections: Vec<DetectionRecord>,
}

impl From<&ImageFile> for DetectionFileSummary {
    fn from(file: &ImageFile) -> Self {
        Self {
            image_id: file.image_id.clone(),
            image_center: file.center,
            detection_count: file.detections.len(),
            detections: file.detections.clone(),
        }
    }
}
