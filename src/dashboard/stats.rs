//! Aggregate statistics shown on the dashboard.

use crate::constants::dashboard::{
    CONFIDENCE_BUCKETS, REGIONS, TOP_ASSOCIATION_LIMIT, TOP_PRIORITY_LIMIT,
};
use crate::site::{Priority, Site, VerificationStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the dashboard summarises for a set of sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of sites.
    pub total_sites: usize,
    /// Sum of site abundances.
    pub total_abundance: usize,
    /// Sites with high priority.
    pub high_priority_sites: usize,
    /// Sites with verified status.
    pub verified_sites: usize,
    /// Verified sites as a percentage of all sites (0 when empty).
    pub verified_percent: f64,
    /// Mean of site confidences (0 when empty).
    pub average_confidence: f64,
    /// Abundance per species, largest first.
    pub species_distribution: Vec<SpeciesCount>,
    /// Per-habitat totals, largest abundance first.
    pub habitat_breakdown: Vec<HabitatSummary>,
    /// Sites per priority.
    pub priority_counts: PriorityCounts,
    /// Sites per verification status.
    pub verification_counts: VerificationCounts,
    /// Sites per confidence range.
    pub confidence_histogram: Vec<ConfidenceBucket>,
    /// Identifiers of the most abundant high-priority sites.
    pub top_priority_sites: Vec<String>,
    /// Sites and abundance per longitude region.
    pub regional_distribution: Vec<RegionSummary>,
    /// Most frequent species and habitat pairings.
    pub species_habitat_associations: Vec<SpeciesHabitatCount>,
}

/// Totals for one longitude band; membership is `min_lng <= lng < max_lng`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    /// Region name.
    pub region: String,
    /// Inclusive western bound.
    pub min_lng: f64,
    /// Exclusive eastern bound.
    pub max_lng: f64,
    /// Number of sites.
    pub sites: usize,
    /// Summed abundance.
    pub abundance: usize,
    /// Abundance per site, rounded half up (0 without sites).
    pub avg_abundance: usize,
}

/// Number of sites sharing a species label and habitat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesHabitatCount {
    /// Species label.
    pub species: String,
    /// Habitat label.
    pub habitat: String,
    /// Number of sites.
    pub count: usize,
}

/// Total abundance for one species label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCount {
    /// Species label.
    pub species: String,
    /// Summed abundance.
    pub abundance: usize,
}

/// Totals for one habitat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitatSummary {
    /// Habitat label.
    pub habitat: String,
    /// Summed abundance.
    pub abundance: usize,
    /// Number of sites.
    pub sites: usize,
    /// Number of high-priority sites.
    pub high_priority: usize,
}

/// Site counts per priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    /// High priority.
    pub high: usize,
    /// Medium priority.
    pub medium: usize,
    /// Low priority.
    pub low: usize,
}

/// Site counts per verification status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCounts {
    /// Verified.
    pub verified: usize,
    /// Needs review.
    pub needs_review: usize,
    /// Unverified.
    pub unverified: usize,
}

/// One confidence histogram bar; membership is `min <= confidence < max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBucket {
    /// Display label.
    pub range: String,
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
    /// Number of sites in range.
    pub count: usize,
}

impl DashboardStats {
    /// Statistics with the default confidence buckets.
    pub fn compute(sites: &[Site]) -> Self {
        Self::compute_with_buckets(sites, CONFIDENCE_BUCKETS)
    }

    /// Statistics with caller-provided `(label, min, max)` buckets.
    pub fn compute_with_buckets(sites: &[Site], buckets: &[(&str, f64, f64)]) -> Self {
        let total_sites = sites.len();
        let total_abundance = sites.iter().map(|s| s.abundance).sum();

        let mut priority_counts = PriorityCounts::default();
        let mut verification_counts = VerificationCounts::default();
        for site in sites {
            match site.priority {
                Priority::High => priority_counts.high += 1,
                Priority::Medium => priority_counts.medium += 1,
                Priority::Low => priority_counts.low += 1,
            }
            match site.verification_status {
                VerificationStatus::Verified => verification_counts.verified += 1,
                VerificationStatus::NeedsReview => verification_counts.needs_review += 1,
                VerificationStatus::Unverified => verification_counts.unverified += 1,
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let (verified_percent, average_confidence) = if total_sites == 0 {
            (0.0, 0.0)
        } else {
            let confidence_sum: f64 = sites.iter().map(|s| s.confidence).sum();
            (
                verification_counts.verified as f64 / total_sites as f64 * 100.0,
                confidence_sum / total_sites as f64,
            )
        };

        Self {
            total_sites,
            total_abundance,
            high_priority_sites: priority_counts.high,
            verified_sites: verification_counts.verified,
            verified_percent,
            average_confidence,
            species_distribution: species_distribution(sites),
            habitat_breakdown: habitat_breakdown(sites),
            priority_counts,
            verification_counts,
            confidence_histogram: confidence_histogram(sites, buckets),
            top_priority_sites: top_priority_sites(sites, TOP_PRIORITY_LIMIT),
            regional_distribution: regional_distribution(sites, REGIONS),
            species_habitat_associations: species_habitat_associations(
                sites,
                TOP_ASSOCIATION_LIMIT,
            ),
        }
    }
}

/// Abundance per species, largest first; ties keep first-seen order.
fn species_distribution(sites: &[Site]) -> Vec<SpeciesCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<SpeciesCount> = Vec::new();

    for site in sites {
        let slot = *index.entry(site.species.as_str()).or_insert_with(|| {
            counts.push(SpeciesCount {
                species: site.species.clone(),
                abundance: 0,
            });
            counts.len() - 1
        });
        counts[slot].abundance += site.abundance;
    }

    counts.sort_by(|a, b| b.abundance.cmp(&a.abundance));
    counts
}

fn habitat_breakdown(sites: &[Site]) -> Vec<HabitatSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<HabitatSummary> = Vec::new();

    for site in sites {
        let slot = *index.entry(site.habitat.as_str()).or_insert_with(|| {
            rows.push(HabitatSummary {
                habitat: site.habitat.clone(),
                abundance: 0,
                sites: 0,
                high_priority: 0,
            });
            rows.len() - 1
        });
        let row = &mut rows[slot];
        row.abundance += site.abundance;
        row.sites += 1;
        if site.priority == Priority::High {
            row.high_priority += 1;
        }
    }

    rows.sort_by(|a, b| b.abundance.cmp(&a.abundance));
    rows
}

/// Sites outside every bucket are not counted.
fn confidence_histogram(sites: &[Site], buckets: &[(&str, f64, f64)]) -> Vec<ConfidenceBucket> {
    buckets
        .iter()
        .map(|&(label, min, max)| ConfidenceBucket {
            range: label.to_string(),
            min,
            max,
            count: sites
                .iter()
                .filter(|s| s.confidence >= min && s.confidence < max)
                .count(),
        })
        .collect()
}

fn top_priority_sites(sites: &[Site], limit: usize) -> Vec<String> {
    let mut high: Vec<&Site> = sites
        .iter()
        .filter(|s| s.priority == Priority::High)
        .collect();
    high.sort_by(|a, b| b.abundance.cmp(&a.abundance));
    high.into_iter().take(limit).map(|s| s.id.clone()).collect()
}

/// Sites outside every region are not counted.
fn regional_distribution(sites: &[Site], regions: &[(&str, f64, f64)]) -> Vec<RegionSummary> {
    regions
        .iter()
        .map(|&(name, min_lng, max_lng)| {
            let (count, abundance) = sites
                .iter()
                .filter(|s| s.lng >= min_lng && s.lng < max_lng)
                .fold((0, 0), |(n, total), s| (n + 1, total + s.abundance));

            RegionSummary {
                region: name.to_string(),
                min_lng,
                max_lng,
                sites: count,
                abundance,
                avg_abundance: if count == 0 {
                    0
                } else {
                    (2 * abundance + count) / (2 * count)
                },
            }
        })
        .collect()
}

/// Pair counts, largest first. Ties keep species first-seen order, then habitat
/// first-seen order within a species.
fn species_habitat_associations(sites: &[Site], limit: usize) -> Vec<SpeciesHabitatCount> {
    let mut species_rank: HashMap<&str, usize> = HashMap::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut pairs: Vec<(usize, SpeciesHabitatCount)> = Vec::new();

    for site in sites {
        let next_rank = species_rank.len();
        let rank = *species_rank.entry(site.species.as_str()).or_insert(next_rank);
        let slot = *index
            .entry((site.species.as_str(), site.habitat.as_str()))
            .or_insert_with(|| {
                pairs.push((
                    rank,
                    SpeciesHabitatCount {
                        species: site.species.clone(),
                        habitat: site.habitat.clone(),
                        count: 0,
                    },
                ));
                pairs.len() - 1
            });
        pairs[slot].1.count += 1;
    }

    pairs.sort_by_key(|(rank, _)| *rank);
    pairs.sort_by(|a, b| b.1.count.cmp(&a.1.count));
    pairs.into_iter().take(limit).map(|(_, pair)| pair).collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::site::{DetectionType, classify_priority, classify_verification};
    use chrono::NaiveDate;

    fn site(id: &str, species: &str, habitat: &str, abundance: usize, confidence: f64) -> Site {
        Site {
            id: id.to_string(),
            lat: 0.0,
            lng: 0.0,
            species: species.to_string(),
            abundance,
            priority: classify_priority(confidence),
            habitat: habitat.to_string(),
            last_surveyed: NaiveDate::default(),
            confidence,
            verification_status: classify_verification(confidence),
            detection_type: DetectionType::IndividualNests,
            image_id: None,
            debug_image_path: None,
            detection_count: abundance,
            detections: Vec::new(),
        }
    }

    #[test]
    fn test_empty_set_has_zero_averages() {
        let stats = DashboardStats::compute(&[]);
        assert_eq!(stats.total_sites, 0);
        assert_eq!(stats.average_confidence, 0.0);
        assert_eq!(stats.verified_percent, 0.0);
        assert!(stats.species_distribution.is_empty());
        assert_eq!(stats.confidence_histogram.len(), 3);
        assert!(stats.confidence_histogram.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_totals_and_counts() {
        let sites = vec![
            site("a", "Royal Tern", "Coastal Habitat", 4, 0.92),
            site("b", "Brown Pelican", "Coastal Habitat", 1, 0.75),
            site("c", "Royal Tern", "Barrier Island", 2, 0.5),
        ];
        let stats = DashboardStats::compute(&sites);

        assert_eq!(stats.total_sites, 3);
        assert_eq!(stats.total_abundance, 7);
        assert_eq!(stats.high_priority_sites, 1);
        assert_eq!(stats.verified_sites, 1);
        assert!((stats.verified_percent - 100.0 / 3.0).abs() < 1e-9);
        assert!((stats.average_confidence - (0.92 + 0.75 + 0.5) / 3.0).abs() < 1e-9);
        assert_eq!(
            stats.priority_counts,
            PriorityCounts {
                high: 1,
                medium: 1,
                low: 1
            }
        );
        assert_eq!(stats.verification_counts.needs_review, 1);
        assert_eq!(stats.verification_counts.unverified, 1);
    }

    #[test]
    fn test_species_distribution_sorted_by_abundance() {
        let sites = vec![
            site("a", "Brown Pelican", "H", 1, 0.9),
            site("b", "Royal Tern", "H", 4, 0.9),
            site("c", "Brown Pelican", "H", 1, 0.9),
            site("d", "Black Skimmer", "H", 2, 0.9),
        ];
        let distribution = DashboardStats::compute(&sites).species_distribution;

        let order: Vec<_> = distribution
            .iter()
            .map(|s| (s.species.as_str(), s.abundance))
            .collect();
        // Pelican and Skimmer tie at 2; Pelican was seen first.
        assert_eq!(
            order,
            [("Royal Tern", 4), ("Brown Pelican", 2), ("Black Skimmer", 2)]
        );
    }

    #[test]
    fn test_habitat_breakdown() {
        let sites = vec![
            site("a", "S", "Coastal Habitat", 1, 0.9),
            site("b", "S", "Barrier Island", 5, 0.9),
            site("c", "S", "Coastal Habitat", 2, 0.5),
        ];
        let breakdown = DashboardStats::compute(&sites).habitat_breakdown;

        assert_eq!(breakdown[0].habitat, "Barrier Island");
        assert_eq!(breakdown[1].habitat, "Coastal Habitat");
        assert_eq!(breakdown[1].abundance, 3);
        assert_eq!(breakdown[1].sites, 2);
        assert_eq!(breakdown[1].high_priority, 1);
    }

    #[test]
    fn test_histogram_bounds_are_half_open() {
        let sites = vec![
            site("a", "S", "H", 1, 0.80),
            site("b", "S", "H", 1, 0.85),
            site("c", "S", "H", 1, 0.949),
            site("d", "S", "H", 1, 0.95),
            site("e", "S", "H", 1, 0.5),
        ];
        let histogram = DashboardStats::compute(&sites).confidence_histogram;

        let counts: Vec<_> = histogram.iter().map(|b| (b.range.as_str(), b.count)).collect();
        assert_eq!(counts, [("80-85%", 1), ("85-90%", 1), ("90-95%", 1)]);
    }

    #[test]
    fn test_custom_buckets() {
        let sites = vec![site("a", "S", "H", 1, 0.3), site("b", "S", "H", 1, 0.7)];
        let stats = DashboardStats::compute_with_buckets(&sites, &[("low", 0.0, 0.5), ("high", 0.5, 1.01)]);
        assert_eq!(stats.confidence_histogram[0].count, 1);
        assert_eq!(stats.confidence_histogram[1].count, 1);
    }

    #[test]
    fn test_top_priority_sites_limited_and_ranked() {
        let sites: Vec<_> = (1..=7)
            .map(|n| site(&format!("s{n}"), "S", "H", n, 0.9))
            .chain(std::iter::once(site("low", "S", "H", 100, 0.1)))
            .collect();
        let top = DashboardStats::compute(&sites).top_priority_sites;

        assert_eq!(top, ["s7", "s6", "s5", "s4", "s3"]);
    }

    fn site_at(id: &str, lng: f64, abundance: usize) -> Site {
        Site {
            lng,
            ..site(id, "S", "H", abundance, 0.9)
        }
    }

    #[test]
    fn test_region_bounds_are_half_open() {
        let sites = vec![
            site_at("west-edge", -93.5, 2),
            site_at("central-edge", -92.0, 3),
            site_at("central", -91.0, 4),
            site_at("east-edge", -88.5, 100),
            site_at("offshore", -95.0, 100),
        ];
        let regions = DashboardStats::compute(&sites).regional_distribution;

        let counts: Vec<_> = regions
            .iter()
            .map(|r| (r.region.as_str(), r.sites, r.abundance))
            .collect();
        assert_eq!(
            counts,
            [
                ("Western LA", 1, 2),
                ("Central LA", 2, 7),
                ("SE Louisiana", 0, 0),
                ("Eastern LA", 0, 0),
            ]
        );
    }

    #[test]
    fn test_region_average_rounds_half_up() {
        let sites = vec![site_at("a", -91.0, 3), site_at("b", -91.5, 4)];
        let regions = DashboardStats::compute(&sites).regional_distribution;
        // 7 / 2 = 3.5
        assert_eq!(regions[1].avg_abundance, 4);
        assert_eq!(regions[0].avg_abundance, 0);
    }

    #[test]
    fn test_species_habitat_associations() {
        let sites = vec![
            site("a", "Royal Tern", "Coastal Habitat", 1, 0.9),
            site("b", "Brown Pelican", "Barrier Island", 1, 0.9),
            site("c", "Royal Tern", "Barrier Island", 1, 0.9),
            site("d", "Brown Pelican", "Barrier Island", 1, 0.9),
            site("e", "Royal Tern", "Coastal Habitat", 1, 0.9),
        ];
        let associations = DashboardStats::compute(&sites).species_habitat_associations;

        let rows: Vec<_> = associations
            .iter()
            .map(|a| (a.species.as_str(), a.habitat.as_str(), a.count))
            .collect();
        assert_eq!(
            rows,
            [
                ("Royal Tern", "Coastal Habitat", 2),
                ("Brown Pelican", "Barrier Island", 2),
                ("Royal Tern", "Barrier Island", 1),
            ]
        );
    }

    #[test]
    fn test_species_habitat_associations_limited() {
        let sites: Vec<_> = (0..12)
            .map(|n| site(&format!("s{n}"), &format!("Species {n}"), "H", 1, 0.9))
            .collect();
        let associations = DashboardStats::compute(&sites).species_habitat_associations;
        assert_eq!(associations.len(), 10);
        assert_eq!(associations[0].species, "Species 0");
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = DashboardStats::compute(&[site("a", "S", "H", 1, 0.9)]);
        let json = serde_json::to_value(&stats).unwrap_or_default();
        assert_eq!(json["totalSites"], 1);
        assert_eq!(json["verificationCounts"]["needsReview"], 0);
        assert_eq!(json["habitatBreakdown"][0]["highPriority"], 1);
        assert_eq!(json["regionalDistribution"][0]["avgAbundance"], 0);
        assert_eq!(json["speciesHabitatAssociations"][0]["count"], 1);
    }
}
