//! Settings commands.

use std::path::Path;

use console::style;

use crate::config::Settings;
use crate::models::{ImageSize, ScrapeCategory};

/// Print the current settings.
pub fn cmd_show(settings: &Settings) -> anyhow::Result<()> {
    println!("bridge_url:   {}", settings.bridge_url);
    println!("art_dir:      {}", settings.art_dir.display());
    println!("category:     {}", settings.scrape.category);
    println!("image_size:   {:?}", settings.scrape.image_size);
    println!("max_images:   {}", settings.scrape.max_images);
    Ok(())
}

/// Validate, persist, and optionally act on a settings change. The stored
/// settings are replaced wholesale, never merged.
pub async fn cmd_set(
    mut settings: Settings,
    config_path: Option<&Path>,
    category: Option<ScrapeCategory>,
    image_size: Option<ImageSize>,
    max_images: Option<usize>,
    scrape: bool,
) -> anyhow::Result<()> {
    if let Some(category) = category {
        settings.scrape.category = category;
    }
    if let Some(image_size) = image_size {
        settings.scrape.image_size = image_size;
    }
    if let Some(max_images) = max_images {
        settings.scrape.max_images = max_images;
    }

    settings.scrape.validate()?;
    settings.save(config_path)?;
    println!("{} Settings saved", style("✓").green());

    if scrape {
        let scrape_settings = settings.scrape.clone();
        super::scrape::run_scrape(&settings, &scrape_settings).await?;
    }

    Ok(())
}
