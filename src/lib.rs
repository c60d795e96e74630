//! Art Scraper - library art acquisition for Roon.
//!
//! Walks the hierarchical browse catalog exposed by a Roon bridge endpoint,
//! enumerates artists or albums, and downloads the associated artwork for
//! each entry to local storage.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{Error, Result};
