//! Art Scraper - library art acquisition for Roon.
//!
//! A tool for scraping artist and album artwork from a Roon library
//! through a bridge endpoint.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artscraper::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "artscraper=info"
    } else {
        "artscraper=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    cli::run().await
}
