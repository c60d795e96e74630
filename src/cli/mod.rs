//! CLI parser and command dispatch.

mod commands;
mod progress;

pub use progress::ConsoleStatus;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::models::{ImageSize, ScrapeCategory};

#[derive(Parser)]
#[command(name = "artscraper")]
#[command(about = "Library art scraper for Roon via a bridge endpoint")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides the default location)
    #[arg(short, long, global = true, env = "ARTSCRAPER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape artwork for the configured (or given) category
    Scrape {
        /// Category to scrape, overriding the persisted setting
        #[arg(long, value_enum)]
        category: Option<ScrapeCategory>,
        /// Image size preset, overriding the persisted setting
        #[arg(long, value_enum)]
        image_size: Option<ImageSize>,
        /// Maximum number of images, overriding the persisted setting
        #[arg(long)]
        max_images: Option<usize>,
    },

    /// Show or change persisted scrape settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the current settings
    Show,
    /// Update and persist scrape settings
    Set {
        #[arg(long, value_enum)]
        category: Option<ScrapeCategory>,
        #[arg(long, value_enum)]
        image_size: Option<ImageSize>,
        #[arg(long)]
        max_images: Option<usize>,
        /// Start a scrape right after saving, like the settings dialog does
        #[arg(long)]
        scrape: bool,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scrape {
            category,
            image_size,
            max_images,
        } => commands::scrape::cmd_scrape(&settings, category, image_size, max_images).await,
        Commands::Settings { command } => match command {
            SettingsCommands::Show => commands::settings::cmd_show(&settings),
            SettingsCommands::Set {
                category,
                image_size,
                max_images,
                scrape,
            } => {
                commands::settings::cmd_set(
                    settings,
                    cli.config.as_deref(),
                    category,
                    image_size,
                    max_images,
                    scrape,
                )
                .await
            }
        },
    }
}
