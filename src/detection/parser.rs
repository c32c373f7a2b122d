//! Detection file parsing.
//!
//! Parses per-image detection JSON documents. Object keys are matched
//! case-insensitively at every level by lower-casing them before the
//! document is mapped onto the typed schema.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::types::{BoundingBox, DetectionRecord, ImageCenter, ImageFile};
use crate::constants::UNIDENTIFIED_SPECIES;
use crate::error::{Error, Result};

/// Internal record for the whole file.
#[derive(Debug, Deserialize)]
struct RawImageFile {
    image_id: String,
    image_center: RawCenter,
    /// Missing and `null` both mean no detections.
    #[serde(default)]
    detections: Option<Vec<RawDetection>>,
}

/// Alternate spellings are separate fields so a file carrying both is not a
/// duplicate-key error; the primary spelling wins.
#[derive(Debug, Deserialize)]
struct RawCenter {
    lat: f64,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDetection {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    species: Option<String>,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    boundingbox: Option<RawBox>,
    #[serde(default)]
    bounding_box: Option<RawBox>,
    /// `[xmin, ymin, xmax, ymax]` as emitted by the detector script.
    #[serde(default)]
    bbox: Option<[f64; 4]>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl From<RawBox> for BoundingBox {
    fn from(raw: RawBox) -> Self {
        Self {
            xmin: raw.xmin,
            ymin: raw.ymin,
            xmax: raw.xmax,
            ymax: raw.ymax,
        }
    }
}

impl From<RawDetection> for DetectionRecord {
    fn from(raw: RawDetection) -> Self {
        let bounding_box = raw
            .boundingbox
            .or(raw.bounding_box)
            .map(BoundingBox::from)
            .or_else(|| raw.bbox.map(BoundingBox::from))
            .unwrap_or_default();

        Self {
            species: raw
                .name
                .or(raw.species)
                .unwrap_or_else(|| UNIDENTIFIED_SPECIES.to_string()),
            confidence: raw.confidence,
            bounding_box,
        }
    }
}

/// Parse a detection file from disk.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The contents are not JSON or fields have the wrong type
/// - `image_id` or `image_center` is missing
pub fn parse_detection_file(path: &Path) -> Result<ImageFile> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::DetectionFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_detection_str(&contents, path)
}

/// Parse detection JSON that was read from `path`.
pub fn parse_detection_str(contents: &str, path: &Path) -> Result<ImageFile> {
    let value: Value = serde_json::from_str(contents).map_err(|e| Error::DetectionParseFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value = lowercase_keys(value);

    let Some(object) = value.as_object() else {
        return Err(Error::InvalidDetectionFormat {
            path: path.to_path_buf(),
            message: "top-level value must be an object".to_string(),
        });
    };

    for required in ["image_id", "image_center"] {
        if object.get(required).is_none_or(Value::is_null) {
            return Err(Error::InvalidDetectionFormat {
                path: path.to_path_buf(),
                message: format!("missing required field '{required}'"),
            });
        }
    }

    let raw: RawImageFile =
        serde_json::from_value(value).map_err(|e| Error::DetectionParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    let Some(lon) = raw.image_center.lon.or(raw.image_center.lng) else {
        return Err(Error::InvalidDetectionFormat {
            path: path.to_path_buf(),
            message: "missing required field 'image_center.lon'".to_string(),
        });
    };

    Ok(ImageFile {
        image_id: raw.image_id,
        center: ImageCenter {
            lat: raw.image_center.lat,
            lon,
        },
        detections: raw
            .detections
            .unwrap_or_default()
            .into_iter()
            .map(DetectionRecord::from)
            .collect(),
        source_path: path.to_path_buf(),
    })
}

/// Lower-case every object key, recursively.
///
/// When two keys differ only by case, the later one in document order wins.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key.to_lowercase(), lowercase_keys(inner)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
