//! Scrape configuration and reporting types.

use serde::{Deserialize, Deserializer, Serialize};

use super::BrowsePath;

/// Which item list gets scraped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeCategory {
    Artist,
    #[default]
    Album,
}

impl ScrapeCategory {
    /// Directory name (and status label) for this category.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Artist => "Artists",
            Self::Album => "Albums",
        }
    }

    /// Fixed browse path for this category, ending in the leaf-list marker.
    pub fn browse_path(&self) -> BrowsePath {
        BrowsePath::new(["Library", self.dir_name(), ""])
    }
}

impl std::fmt::Display for ScrapeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Named artwork size preset passed through to the image service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ImageSize {
    /// Fixed width and height for this preset.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Small => (225, 225),
            Self::Medium => (500, 500),
            Self::Large => (1000, 1000),
        }
    }
}

// Unrecognized presets in persisted settings fall back to Medium instead of
// failing the whole settings load.
impl<'de> Deserialize<'de> for ImageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_lowercase().as_str() {
            "small" => Self::Small,
            "large" => Self::Large,
            _ => Self::Medium,
        })
    }
}

/// Persisted scrape settings, replaced wholesale on each accepted update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeSettings {
    #[serde(default)]
    pub category: ScrapeCategory,
    #[serde(default)]
    pub image_size: ImageSize,
    #[serde(default = "default_max_images")]
    pub max_images: usize,
}

fn default_max_images() -> usize {
    1000
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            category: ScrapeCategory::default(),
            image_size: ImageSize::default(),
            max_images: default_max_images(),
        }
    }
}

/// Bounds for `max_images`.
pub const MAX_IMAGES_RANGE: std::ops::RangeInclusive<usize> = 1..=10000;

impl ScrapeSettings {
    pub fn new(category: ScrapeCategory, image_size: ImageSize, max_images: usize) -> Self {
        Self {
            category,
            image_size,
            max_images,
        }
    }

    /// Validate settings before accepting them.
    pub fn validate(&self) -> crate::Result<()> {
        if !MAX_IMAGES_RANGE.contains(&self.max_images) {
            return Err(crate::Error::InvalidSettings(format!(
                "max_images must be between {} and {}, got {}",
                MAX_IMAGES_RANGE.start(),
                MAX_IMAGES_RANGE.end(),
                self.max_images
            )));
        }
        Ok(())
    }
}

/// Outcome of a completed scrape run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Items enumerated into the working list (after the cap).
    pub total: usize,
    /// Images written to disk.
    pub saved: usize,
    /// Items skipped: missing image key or download retries exhausted.
    pub skipped: usize,
    /// Images fetched but not written due to an I/O failure.
    pub write_failures: usize,
}
