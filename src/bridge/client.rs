//! HTTP client for a Roon bridge endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{BrowseService, ImageData, ImageOpts, ImageService};
use crate::models::{BrowseOpts, BrowseResponse, LoadOpts, LoadResponse};
use crate::{Error, Result};

const USER_AGENT: &str = concat!("artscraper/", env!("CARGO_PKG_VERSION"));

/// JSON-over-HTTP client for the bridge's browse and image endpoints.
#[derive(Clone)]
pub struct BridgeClient {
    client: Client,
    base_url: Url,
    request_delay: Duration,
}

impl BridgeClient {
    /// Create a client for the given bridge base URL.
    pub fn new(base_url: Url, timeout: Duration, request_delay: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url,
            request_delay,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("invalid bridge URL path {path}: {e}")))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::service(path, format!("HTTP {status}")));
        }

        let parsed = response.json::<T>().await?;

        // Base delay between bridge requests, keeps the remote responsive.
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        Ok(parsed)
    }
}

#[async_trait]
impl BrowseService for BridgeClient {
    async fn browse(&self, opts: &BrowseOpts) -> Result<BrowseResponse> {
        self.post_json("api/browse", opts).await
    }

    async fn load(&self, opts: &LoadOpts) -> Result<LoadResponse> {
        self.post_json("api/load", opts).await
    }
}

#[async_trait]
impl ImageService for BridgeClient {
    async fn get_image(&self, image_key: &str, opts: &ImageOpts) -> Result<ImageData> {
        let mut url = self.endpoint(&format!("api/image/{image_key}"))?;
        url.query_pairs_mut()
            .append_pair("scale", &opts.scale)
            .append_pair("width", &opts.width.to_string())
            .append_pair("height", &opts.height.to_string())
            .append_pair("format", &opts.format);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::service("api/image", format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        Ok(ImageData {
            content_type,
            bytes,
        })
    }
}
