//! Service seams toward the Roon bridge.
//!
//! The walker and pipeline only ever talk to these traits; the binary wires
//! them to [`BridgeClient`], tests wire them to in-memory fakes.

mod client;

pub use client::BridgeClient;

use async_trait::async_trait;

use crate::models::{BrowseOpts, BrowseResponse, ImageSize, LoadOpts, LoadResponse};
use crate::Result;

/// Two-phase catalog navigation: `browse` positions a cursor into a
/// hierarchy node, `load` fetches a page of items at an offset.
#[async_trait]
pub trait BrowseService: Send + Sync {
    async fn browse(&self, opts: &BrowseOpts) -> Result<BrowseResponse>;
    async fn load(&self, opts: &LoadOpts) -> Result<LoadResponse>;
}

/// Artwork retrieval by opaque image key.
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn get_image(&self, image_key: &str, opts: &ImageOpts) -> Result<ImageData>;
}

/// Fire-and-forget status reporting, no acknowledgement.
pub trait StatusSink: Send + Sync {
    fn set_status(&self, message: &str, is_error: bool);
}

/// Scaling options for an image request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ImageOpts {
    pub scale: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl ImageOpts {
    /// Scale-to-fill JPEG at the given preset's dimensions.
    pub fn fill_jpeg(size: ImageSize) -> Self {
        let (width, height) = size.dimensions();
        Self {
            scale: "fill".to_string(),
            width,
            height,
            format: "image/jpeg".to_string(),
        }
    }
}

/// Raw image bytes plus the content type reported by the service.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
