//! Habitat labelling for sites.

use crate::constants::DEFAULT_HABITAT;
use crate::detection::ImageFile;

/// Supplies the habitat label for an image.
pub trait HabitatSource: Send + Sync {
    /// Habitat for the site built from `file`.
    fn habitat_for(&self, file: &ImageFile) -> String;
}

/// The same habitat for every site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHabitat(String);

impl FixedHabitat {
    /// Use `habitat` for every site.
    pub fn new(habitat: impl Into<String>) -> Self {
        Self(habitat.into())
    }
}

impl Default for FixedHabitat {
    fn default() -> Self {
        Self::new(DEFAULT_HABITAT)
    }
}

impl HabitatSource for FixedHabitat {
    fn habitat_for(&self, _file: &ImageFile) -> String {
        self.0.clone()
    }
}
