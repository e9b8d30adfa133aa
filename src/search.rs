// src/search.rs
// Shopping/image search: provider trait + the Serper implementation.

use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;
use tracing::info;

use crate::error::{Result, ScoutError};
use crate::types::{ImageItem, ShoppingItem};

/// Seam for the search calls so the scout can run against mocks.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Priced shopping results for a query.
    async fn shopping(&self, query: &str) -> Result<Vec<ShoppingItem>>;

    /// Generic image results for a query.
    async fn images(&self, query: &str) -> Result<Vec<ImageItem>>;

    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Seam for the per-article image pass: resolve a title to one image URL.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn image_for(&self, title: &str) -> Result<String>;
}

/// Production image source: first usable hit from the image search.
pub struct SearchImageSource {
    search: std::sync::Arc<dyn SearchProvider>,
}

impl SearchImageSource {
    pub fn new(search: std::sync::Arc<dyn SearchProvider>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl ImageSource for SearchImageSource {
    async fn image_for(&self, title: &str) -> Result<String> {
        let items = self.search.images(title).await?;
        items
            .into_iter()
            .map(|i| i.image_url)
            .find(|u| !u.is_empty())
            .ok_or_else(|| ScoutError::Format(format!("no image results for \"{title}\"")))
    }
}

const SERPER_BASE: &str = "https://google.serper.dev";

pub struct SerperClient {
    http: reqwest::Client,
    api_key: String,
    region: String,
}

#[derive(Debug, Deserialize)]
struct ShoppingResponse {
    #[serde(default)]
    shopping: Vec<ShoppingItem>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    images: Vec<ImageItem>,
}

impl SerperClient {
    pub fn new(api_key: &str, region: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ScoutError::Configuration(
                "serper api key must not be empty".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .user_agent("trend-scout/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| ScoutError::transport("serper", e))?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            region: region.to_string(),
        })
    }

    async fn post<T: serde::de::DeserializeOwned>(&self, path: &str, query: &str) -> Result<T> {
        let body = serde_json::json!({ "q": query, "gl": self.region });

        let resp = self
            .http
            .post(format!("{SERPER_BASE}/{path}"))
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                counter!("search_provider_errors_total").increment(1);
                ScoutError::transport("serper", e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            counter!("search_provider_errors_total").increment(1);
            return Err(ScoutError::Transport {
                endpoint: "serper",
                message: format!("status {status}"),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ScoutError::Format(format!("serper response body: {e}")))
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    async fn shopping(&self, query: &str) -> Result<Vec<ShoppingItem>> {
        let data: ShoppingResponse = self.post("shopping", query).await?;
        info!(query, count = data.shopping.len(), "serper shopping search");
        Ok(data.shopping)
    }

    async fn images(&self, query: &str) -> Result<Vec<ImageItem>> {
        let data: ImagesResponse = self.post("images", query).await?;
        info!(query, count = data.images.len(), "serper image search");
        Ok(data.images)
    }

    fn name(&self) -> &'static str {
        "serper"
    }
}
