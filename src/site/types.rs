//! Site type definitions.

use crate::detection::DetectionRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated per-image nesting site summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Site identifier (the image identifier).
    pub id: String,
    /// Image center latitude.
    pub lat: f64,
    /// Image center longitude.
    pub lng: f64,
    /// Species label for the site.
    pub species: String,
    /// Number of detections, used as a population proxy.
    pub abundance: usize,
    /// Conservation priority.
    pub priority: Priority,
    /// Habitat label.
    pub habitat: String,
    /// Date the site record was produced.
    pub last_surveyed: NaiveDate,
    /// Mean detection confidence.
    pub confidence: f64,
    /// Verification status.
    pub verification_status: VerificationStatus,
    /// Colony or individual nests.
    pub detection_type: DetectionType,
    /// Source image identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    /// URL path of the annotated debug image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_image_path: Option<String>,
    /// Number of detections.
    pub detection_count: usize,
    /// The detections behind this site.
    pub detections: Vec<DetectionRecord>,
}

/// Conservation priority derived from mean confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Mean confidence above 0.8.
    High,
    /// Mean confidence above 0.6.
    Medium,
    /// Everything else.
    Low,
}

/// How far a site's detections can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStatus {
    /// Mean confidence above 0.85.
    Verified,
    /// Mean confidence above 0.7.
    NeedsReview,
    /// Everything else.
    Unverified,
}

/// Kind of nesting activity a site represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionType {
    /// More than one detection in the image.
    NestColony,
    /// Exactly one detection in the image.
    IndividualNests,
    /// Accepted from clients; never produced by aggregation.
    RoostingSite,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verified => write!(f, "verified"),
            Self::NeedsReview => write!(f, "needs-review"),
            Self::Unverified => write!(f, "unverified"),
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verified" => Ok(Self::Verified),
            "needs-review" | "needs_review" => Ok(Self::NeedsReview),
            "unverified" => Ok(Self::Unverified),
            other => Err(format!("unknown verification status: {other}")),
        }
    }
}

impl std::fmt::Display for DetectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NestColony => write!(f, "nest-colony"),
            Self::IndividualNests => write!(f, "individual-nests"),
            Self::RoostingSite => write!(f, "roosting-site"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_str() {
        assert_eq!("high".parse::<Priority>().ok(), Some(Priority::High));
        assert_eq!(" Medium ".parse::<Priority>().ok(), Some(Priority::Medium));
        assert_eq!("LOW".parse::<Priority>().ok(), Some(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_verification_status_from_str() {
        assert_eq!(
            "needs-review".parse::<VerificationStatus>().ok(),
            Some(VerificationStatus::NeedsReview)
        );
        assert_eq!(
            "needs_review".parse::<VerificationStatus>().ok(),
            Some(VerificationStatus::NeedsReview)
        );
        assert!("pending".parse::<VerificationStatus>().is_err());
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(Priority::Medium.to_string(), "medium");
        assert_eq!(VerificationStatus::NeedsReview.to_string(), "needs-review");
        assert_eq!(DetectionType::IndividualNests.to_string(), "individual-nests");

        assert_eq!(
            serde_json::to_value(VerificationStatus::NeedsReview).ok(),
            Some(serde_json::json!("needs-review"))
        );
        assert_eq!(
            serde_json::to_value(DetectionType::NestColony).ok(),
            Some(serde_json::json!("nest-colony"))
        );
    }
}
