//! Scrape command.

use std::sync::Arc;

use console::style;

use crate::bridge::BridgeClient;
use crate::cli::ConsoleStatus;
use crate::config::Settings;
use crate::models::{ImageSize, ScrapeCategory, ScrapeSettings};
use crate::services::ScrapePipeline;
use crate::storage::ArtStore;

/// Run one scrape with the persisted settings, applying any overrides for
/// this invocation only.
pub async fn cmd_scrape(
    settings: &Settings,
    category: Option<ScrapeCategory>,
    image_size: Option<ImageSize>,
    max_images: Option<usize>,
) -> anyhow::Result<()> {
    let scrape_settings = ScrapeSettings {
        category: category.unwrap_or(settings.scrape.category),
        image_size: image_size.unwrap_or(settings.scrape.image_size),
        max_images: max_images.unwrap_or(settings.scrape.max_images),
    };
    scrape_settings.validate()?;

    run_scrape(settings, &scrape_settings).await
}

/// Wire the bridge client, storage, and status display to the pipeline and
/// run it.
pub async fn run_scrape(
    settings: &Settings,
    scrape_settings: &ScrapeSettings,
) -> anyhow::Result<()> {
    let client = BridgeClient::new(
        settings.bridge_url()?,
        settings.request_timeout(),
        settings.request_delay(),
    )?;
    let client = Arc::new(client);
    let status = Arc::new(ConsoleStatus::new());

    println!(
        "{} Scraping {} (up to {} images, {:?} size) into {}",
        style("→").cyan(),
        scrape_settings.category,
        scrape_settings.max_images,
        scrape_settings.image_size,
        settings.art_dir.display(),
    );

    let pipeline = ScrapePipeline::new(
        client.clone(),
        client,
        status.clone(),
        ArtStore::new(&settings.art_dir),
    );

    let report = pipeline.run(scrape_settings).await?;
    status.finish();

    println!(
        "{} {} items: {} saved, {} skipped, {} write failures",
        style("✓").green(),
        report.total,
        report.saved,
        report.skipped,
        report.write_failures,
    );

    Ok(())
}
