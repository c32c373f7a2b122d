//! Confidence-threshold classifications.
//!
//! All comparisons are strict, so a mean of exactly 0.8 is `medium`.

use super::types::{DetectionType, Priority, VerificationStatus};
use crate::constants::{priority, verification};
use crate::detection::DetectionRecord;

/// Arithmetic mean of detection confidences, `None` for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn mean_confidence(detections: &[DetectionRecord]) -> Option<f64> {
    if detections.is_empty() {
        return None;
    }

    let sum: f64 = detections.iter().map(|d| d.confidence).sum();
    Some(sum / detections.len() as f64)
}

/// Classify mean confidence into a priority.
pub fn classify_priority(confidence: f64) -> Priority {
    if confidence > priority::HIGH {
        Priority::High
    } else if confidence > priority::MEDIUM {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Classify mean confidence into a verification status.
pub fn classify_verification(confidence: f64) -> VerificationStatus {
    if confidence > verification::VERIFIED {
        VerificationStatus::Verified
    } else if confidence > verification::NEEDS_REVIEW {
        VerificationStatus::NeedsReview
    } else {
        VerificationStatus::Unverified
    }
}

/// Detection type from the number of detections.
pub fn classify_detection_type(count: usize) -> DetectionType {
    if count > 1 {
        DetectionType::NestColony
    } else {
        DetectionType::IndividualNests
    }
}
