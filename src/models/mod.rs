//! Data models for the scraper.

mod browse;
mod scrape;

pub use browse::{
    BrowseAction, BrowseList, BrowseOpts, BrowsePath, BrowseResponse, Item, LoadOpts, LoadResponse,
};
pub use scrape::{ImageSize, ScrapeCategory, ScrapeReport, ScrapeSettings};
