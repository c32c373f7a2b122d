//! Site filter predicates.

use crate::site::{Priority, Site, VerificationStatus};
use serde::{Deserialize, Serialize};

/// Conjunction of dashboard filter predicates.
///
/// An empty list places no constraint on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteFilter {
    /// Accepted species labels.
    pub species: Vec<String>,
    /// Accepted habitats.
    pub habitat: Vec<String>,
    /// Accepted priorities.
    pub priority: Vec<Priority>,
    /// Accepted verification statuses.
    pub verification_status: Vec<VerificationStatus>,
    /// Minimum abundance, inclusive.
    pub min_abundance: usize,
}

impl SiteFilter {
    /// Whether `site` passes every predicate.
    pub fn matches(&self, site: &Site) -> bool {
        (self.species.is_empty() || self.species.contains(&site.species))
            && (self.habitat.is_empty() || self.habitat.contains(&site.habitat))
            && (self.priority.is_empty() || self.priority.contains(&site.priority))
            && (self.verification_status.is_empty()
                || self.verification_status.contains(&site.verification_status))
            && site.abundance >= self.min_abundance
    }

    /// Keep the sites that match, preserving order.
    pub fn apply(&self, sites: Vec<Site>) -> Vec<Site> {
        sites.into_iter().filter(|site| self.matches(site)).collect()
    }

    /// Number of active constraints.
    pub fn active_count(&self) -> usize {
        self.species.len()
            + self.habitat.len()
            + self.priority.len()
            + self.verification_status.len()
            + usize::from(self.min_abundance > 0)
    }
}

/// Filter as it arrives in a query string: comma-separated lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Comma-separated species labels.
    pub species: Option<String>,
    /// Comma-separated habitats.
    pub habitat: Option<String>,
    /// Comma-separated priorities.
    pub priority: Option<String>,
    /// Comma-separated verification statuses.
    pub verification_status: Option<String>,
    /// Minimum abundance.
    pub min_abundance: Option<usize>,
}

impl TryFrom<FilterParams> for SiteFilter {
    type Error = String;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        Ok(Self {
            species: split_list(params.species.as_deref()),
            habitat: split_list(params.habitat.as_deref()),
            priority: split_list(params.priority.as_deref())
                .iter()
                .map(|s| s.parse())
                .collect::<Result<_, _>>()?,
            verification_status: split_list(params.verification_status.as_deref())
                .iter()
                .map(|s| s.parse())
                .collect::<Result<_, _>>()?,
            min_abundance: params.min_abundance.unwrap_or(0),
        })
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::site::DetectionType;
    use chrono::NaiveDate;

    fn site(species: &str, abundance: usize, priority: Priority) -> Site {
        Site {
            id: species.to_string(),
            lat: 0.0,
            lng: 0.0,
            species: species.to_string(),
            abundance,
            priority,
            habitat: "Coastal Habitat".to_string(),
            last_surveyed: NaiveDate::default(),
            confidence: 0.9,
            verification_status: VerificationStatus::Verified,
            detection_type: DetectionType::IndividualNests,
            image_id: None,
            debug_image_path: None,
            detection_count: abundance,
            detections: Vec::new(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = SiteFilter::default();
        assert!(filter.matches(&site("Royal Tern", 1, Priority::Low)));
        assert_eq!(filter.active_count(), 0);
    }

    #[test]
    fn test_filter_is_a_conjunction() {
        let filter = SiteFilter {
            species: vec!["Royal Tern".to_string()],
            priority: vec![Priority::High],
            min_abundance: 2,
            ..SiteFilter::default()
        };

        assert!(filter.matches(&site("Royal Tern", 2, Priority::High)));
        assert!(!filter.matches(&site("Royal Tern", 1, Priority::High)));
        assert!(!filter.matches(&site("Royal Tern", 3, Priority::Medium)));
        assert!(!filter.matches(&site("Laughing Gull", 3, Priority::High)));
        assert_eq!(filter.active_count(), 3);
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = SiteFilter {
            min_abundance: 2,
            ..SiteFilter::default()
        };
        let kept = filter.apply(vec![
            site("a", 5, Priority::Low),
            site("b", 1, Priority::Low),
            site("c", 2, Priority::Low),
        ]);
        let ids: Vec<_> = kept.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_params_parse_lists() {
        let filter = SiteFilter::try_from(FilterParams {
            species: Some("Royal Tern, Brown Pelican,".to_string()),
            priority: Some("high,medium".to_string()),
            verification_status: Some("needs-review".to_string()),
            min_abundance: Some(3),
            ..FilterParams::default()
        })
        .unwrap();

        assert_eq!(filter.species, ["Royal Tern", "Brown Pelican"]);
        assert_eq!(filter.priority, [Priority::High, Priority::Medium]);
        assert_eq!(filter.verification_status, [VerificationStatus::NeedsReview]);
        assert_eq!(filter.min_abundance, 3);
        assert!(filter.habitat.is_empty());
    }

    #[test]
    fn test_params_reject_unknown_priority() {
        let result = SiteFilter::try_from(FilterParams {
            priority: Some("urgent".to_string()),
            ..FilterParams::default()
        });
        assert!(result.is_err());
    }
}
