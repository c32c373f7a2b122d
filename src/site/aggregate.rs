//! Per-image site aggregation.

use super::classify::{
    classify_detection_type, classify_priority, classify_verification, mean_confidence,
};
use super::habitat::HabitatSource;
use super::types::Site;
use crate::constants::debug_image;
use crate::detection::ImageFile;
use chrono::NaiveDate;

/// Inputs to aggregation that do not come from the detection file.
pub struct SiteContext<'a> {
    /// Habitat label provider.
    pub habitat: &'a dyn HabitatSource,
    /// Value for `last_surveyed`.
    pub surveyed_on: NaiveDate,
}

/// Build the site summary for one image.
///
/// Returns `None` when the image has no detections.
pub fn aggregate_site(file: &ImageFile, ctx: &SiteContext<'_>) -> Option<Site> {
    let confidence = mean_confidence(&file.detections)?;
    let count = file.detections.len();

    let species = match file.detections.as_slice() {
        [only] => only.species.clone(),
        _ => format!("Multiple Species ({count} detections)"),
    };

    Some(Site {
        id: file.image_id.clone(),
        lat: file.center.lat,
        lng: file.center.lon,
        species,
        abundance: count,
        priority: classify_priority(confidence),
        habitat: ctx.habitat.habitat_for(file),
        last_surveyed: ctx.surveyed_on,
        confidence,
        verification_status: classify_verification(confidence),
        detection_type: classify_detection_type(count),
        image_id: Some(file.image_id.clone()),
        debug_image_path: Some(debug_image_path(&file.image_id)),
        detection_count: count,
        detections: file.detections.clone(),
    })
}

/// Aggregate every file, dropping images without detections.
pub fn aggregate_sites(files: &[ImageFile], ctx: &SiteContext<'_>) -> Vec<Site> {
    files
        .iter()
        .filter_map(|file| aggregate_site(file, ctx))
        .collect()
}

/// URL path of the debug image for `image_id`. The file is not checked.
pub fn debug_image_path(image_id: &str) -> String {
    format!(
        "{}/{image_id}{}{}",
        debug_image::URL_PREFIX,
        debug_image::SUFFIX,
        debug_image::EXTENSION
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::detection::{BoundingBox, DetectionRecord, ImageCenter};
    use crate::site::{DetectionType, FixedHabitat, Priority, VerificationStatus};
    use std::path::PathBuf;

    fn image(id: &str, detections: &[(&str, f64)]) -> ImageFile {
        ImageFile {
            image_id: id.to_string(),
            center: ImageCenter {
                lat: 29.9032,
                lon: -91.9018,
            },
            detections: detections
                .iter()
                .map(|&(species, confidence)| DetectionRecord {
                    species: species.to_string(),
                    confidence,
                    bounding_box: BoundingBox::default(),
                })
                .collect(),
            source_path: PathBuf::from(format!("{id}.json")),
        }
    }

    fn survey_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 14).unwrap()
    }

    fn aggregate(file: &ImageFile) -> Option<Site> {
        let habitat = FixedHabitat::default();
        let ctx = SiteContext {
            habitat: &habitat,
            surveyed_on: survey_date(),
        };
        aggregate_site(file, &ctx)
    }

    #[test]
    fn test_no_detections_yields_no_site() {
        assert!(aggregate(&image("EMPTY", &[])).is_none());
    }

    #[test]
    fn test_single_detection_site() {
        let site = aggregate(&image("DJI_0007", &[("Royal Tern", 0.9)])).unwrap();

        assert_eq!(site.id, "DJI_0007");
        assert_eq!(site.species, "Royal Tern");
        assert_eq!(site.abundance, 1);
        assert_eq!(site.detection_count, 1);
        assert_eq!(site.detection_type, DetectionType::IndividualNests);
        assert_eq!(site.lat, 29.9032);
        assert_eq!(site.lng, -91.9018);
        assert_eq!(site.habitat, "Coastal Habitat");
        assert_eq!(site.last_surveyed, survey_date());
        assert_eq!(site.image_id.as_deref(), Some("DJI_0007"));
        assert_eq!(
            site.debug_image_path.as_deref(),
            Some("/images/debug/DJI_0007_debug.jpg")
        );
    }

    #[test]
    fn test_single_unidentified_detection_keeps_placeholder() {
        let site = aggregate(&image("U", &[("Unidentified Bird", 0.5)])).unwrap();
        assert_eq!(site.species, "Unidentified Bird");
    }

    #[test]
    fn test_multiple_detections_site() {
        let site = aggregate(&image("C", &[("Royal Tern", 0.9), ("Royal Tern", 0.7)])).unwrap();

        assert_eq!(site.species, "Multiple Species (2 detections)");
        assert_eq!(site.abundance, 2);
        assert_eq!(site.detection_type, DetectionType::NestColony);
        assert!((site.confidence - 0.8).abs() < 1e-9);
        // Strict comparison: a mean of 0.8 is not high.
        assert_eq!(site.priority, Priority::Medium);
        assert_eq!(site.verification_status, VerificationStatus::NeedsReview);
    }

    #[test]
    fn test_high_confidence_colony() {
        let site = aggregate(&image("A", &[("Brown Pelican", 0.9), ("Brown Pelican", 0.95)]))
            .unwrap();

        assert!((site.confidence - 0.925).abs() < 1e-9);
        assert_eq!(site.priority, Priority::High);
        assert_eq!(site.verification_status, VerificationStatus::Verified);
    }

    #[test]
    fn test_aggregate_sites_filters_empty_and_keeps_order() {
        let habitat = FixedHabitat::new("Barrier Island");
        let ctx = SiteContext {
            habitat: &habitat,
            surveyed_on: survey_date(),
        };
        let files = vec![
            image("A", &[("Brown Pelican", 0.9), ("Brown Pelican", 0.95)]),
            image("B", &[]),
            image("C", &[("Black Skimmer", 0.4)]),
        ];

        let sites = aggregate_sites(&files, &ctx);
        let ids: Vec<_> = sites.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["A", "C"]);
        assert!(sites.iter().all(|s| s.habitat == "Barrier Island"));
    }

    #[test]
    fn test_site_json_shape() {
        let site = aggregate(&image("J", &[("Royal Tern", 0.9)])).unwrap();
        let json = serde_json::to_value(&site).unwrap();

        assert_eq!(json["id"], "J");
        assert_eq!(json["lastSurveyed"], "2026-05-14");
        assert_eq!(json["verificationStatus"], "verified");
        assert_eq!(json["detectionType"], "individual-nests");
        assert_eq!(json["debugImagePath"], "/images/debug/J_debug.jpg");
        assert_eq!(json["detectionCount"], 1);
        assert_eq!(json["detections"][0]["species"], "Royal Tern");
    }
}
