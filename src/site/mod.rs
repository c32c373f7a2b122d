//! Nesting site aggregation.
//!
//! Turns each parsed detection file into at most one [`Site`] summary.

mod aggregate;
mod classify;
mod habitat;
mod types;

pub use aggregate::{SiteContext, aggregate_site, aggregate_sites, debug_image_path};
pub use classify::{
    classify_detection_type, classify_priority, classify_verification, mean_confidence,
};
pub use habitat::{FixedHabitat, HabitatSource};
pub use types::{DetectionType, Priority, Site, VerificationStatus};
