//! Read operations over sites and detection files.
//!
//! Every call re-runs the full read → parse → aggregate pipeline against the
//! detection source. Lookups by identifier are linear scans.

use crate::config::Config;
use crate::detection::{DetectionFileSummary, DetectionSource, FsDetectionSource};
use crate::error::Result;
use crate::site::{
    FixedHabitat, HabitatSource, Site, SiteContext, aggregate_site, aggregate_sites,
};
use chrono::NaiveDate;
use tracing::debug;

/// Produces the `last_surveyed` date for a read.
pub type Clock = fn() -> NaiveDate;

/// Local wall-clock date.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Query service over the configured detection directory.
pub fn site_query(config: &Config) -> SiteQuery<FsDetectionSource> {
    SiteQuery::new(
        FsDetectionSource::new(config.data.detections_dir.clone(), config.data.on_malformed),
        FixedHabitat::new(config.sites.habitat.clone()),
    )
}

/// Query service over a detection source.
pub struct SiteQuery<S> {
    source: S,
    habitat: Box<dyn HabitatSource>,
    clock: Clock,
}

impl<S: DetectionSource> SiteQuery<S> {
    /// Create a query service using the local date for `last_surveyed`.
    pub fn new(source: S, habitat: impl HabitatSource + 'static) -> Self {
        Self {
            source,
            habitat: Box::new(habitat),
            clock: local_today,
        }
    }

    /// Replace the date source.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// All sites, in source order.
    pub fn list_sites(&self) -> Result<Vec<Site>> {
        let scan = self.source.scan()?;
        let ctx = self.context();
        let sites = aggregate_sites(&scan.files, &ctx);
        debug!(
            "Aggregated {} site(s) from {} file(s)",
            sites.len(),
            scan.files.len()
        );
        Ok(sites)
    }

    /// The site for the first file whose image identifier equals `id`.
    ///
    /// `Ok(None)` if no file matches or the matching file has no detections.
    pub fn get_site(&self, id: &str) -> Result<Option<Site>> {
        let scan = self.source.scan()?;
        let ctx = self.context();
        Ok(scan
            .files
            .iter()
            .find(|file| file.image_id == id)
            .and_then(|file| aggregate_site(file, &ctx)))
    }

    /// Summaries of every detection file, including those without detections.
    pub fn list_detections(&self) -> Result<Vec<DetectionFileSummary>> {
        let scan = self.source.scan()?;
        Ok(scan.files.iter().map(DetectionFileSummary::from).collect())
    }

    /// Summary of the first file whose image identifier equals `image_id`.
    pub fn get_detection(&self, image_id: &str) -> Result<Option<DetectionFileSummary>> {
        let scan = self.source.scan()?;
        Ok(scan
            .files
            .iter()
            .find(|file| file.image_id == image_id)
            .map(DetectionFileSummary::from))
    }

    fn context(&self) -> SiteContext<'_> {
        SiteContext {
            habitat: self.habitat.as_ref(),
            surveyed_on: (self.clock)(),
        }
    }
}
