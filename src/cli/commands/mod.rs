//! Command implementations.

pub mod scrape;
pub mod settings;
