//! Storage helpers for artwork on disk.

use std::path::{Path, PathBuf};

use crate::models::ScrapeCategory;
use crate::Result;

/// Replace characters that break paths or shells with underscores.
pub fn sanitize_title(title: &str) -> String {
    title.replace(['?', '/', '"', '<', '>', ':'], "_")
}

/// Writes scraped artwork under `{root}/{Artists|Albums}/{title}.jpg`.
#[derive(Debug, Clone)]
pub struct ArtStore {
    root: PathBuf,
}

impl ArtStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output directory for a category.
    pub fn category_dir(&self, category: ScrapeCategory) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Create the category directory, parents included. Idempotent.
    pub fn ensure_category_dir(&self, category: ScrapeCategory) -> Result<()> {
        std::fs::create_dir_all(self.category_dir(category))?;
        Ok(())
    }

    /// Path the artwork for `title` is written to.
    pub fn art_path(&self, category: ScrapeCategory, title: &str) -> PathBuf {
        self.category_dir(category)
            .join(format!("{}.jpg", sanitize_title(title)))
    }

    /// Write artwork bytes as a whole file, overwriting any previous art.
    pub fn write_art(
        &self,
        category: ScrapeCategory,
        title: &str,
        bytes: &[u8],
    ) -> Result<PathBuf> {
        let path = self.art_path(category, title);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
