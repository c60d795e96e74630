//! Catalog traversal and the scrape pipeline.

pub mod scrape;
pub mod walker;

pub use scrape::{ScrapePipeline, MAX_FETCH_ATTEMPTS};
pub use walker::{CatalogWalker, WalkPage};
