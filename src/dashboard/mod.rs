//! Dashboard filtering and aggregate statistics.
//!
//! These operate on already-aggregated [`Site`](crate::site::Site) lists and
//! never touch the detection source.

mod filter;
mod stats;

pub use filter::{FilterParams, SiteFilter};
pub use stats::{
    ConfidenceBucket, DashboardStats, HabitatSummary, PriorityCounts, RegionSummary,
    SpeciesCount, SpeciesHabitatCount, VerificationCounts,
};
