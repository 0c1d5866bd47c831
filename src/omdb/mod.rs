//! OMDb catalog client: the remote side of every lookup.
//!
//! One request per call, no retries. Classification stops at transport level;
//! what a payload means is decided by [`crate::lookup`].

pub mod errors;
pub mod json;
pub mod middleware;
pub mod models;

pub use errors::FetchError;
pub use models::{ApiStatus, DetailsPayload, RatingItem, SearchItem, SearchPayload};

use anyhow::Context;
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::omdb::middleware::TransparentMiddleware;

pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// The two remote lookups the coordinator depends on.
#[async_trait::async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Search by title (`?s=`).
    async fn fetch_search(&self, query: &str) -> Result<SearchPayload, FetchError>;

    /// Details by IMDb id (`?i=`). `Ok(None)` means the body was JSON `null`.
    async fn fetch_details(&self, asset_id: &str) -> Result<Option<DetailsPayload>, FetchError>;
}

#[async_trait::async_trait]
impl<T: CatalogFetcher + ?Sized> CatalogFetcher for Arc<T> {
    async fn fetch_search(&self, query: &str) -> Result<SearchPayload, FetchError> {
        (**self).fetch_search(query).await
    }

    async fn fetch_details(&self, asset_id: &str) -> Result<Option<DetailsPayload>, FetchError> {
        (**self).fetch_details(asset_id).await
    }
}

#[derive(custom_debug_derive::Debug)]
pub struct OmdbClient {
    #[debug(skip)]
    http: ClientWithMiddleware,
    base_url: Url,
    #[debug(skip)]
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: Url, api_key: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("instant-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let http = reqwest_middleware::ClientBuilder::new(client)
            .with(TransparentMiddleware)
            .build();

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn request_url(&self, param: &str, value: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair(param, value);
        url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let shown = redact(&url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: shown,
            });
        }

        let body = response.text().await?;
        json::parse_json_with_context(&body).map_err(|source| FetchError::ParseFailed { url: shown, source })
    }
}

#[async_trait::async_trait]
impl CatalogFetcher for OmdbClient {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch_search(&self, query: &str) -> Result<SearchPayload, FetchError> {
        self.get_json(self.request_url("s", query)).await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch_details(&self, asset_id: &str) -> Result<Option<DetailsPayload>, FetchError> {
        self.get_json(self.request_url("i", asset_id)).await
    }
}

/// The URL without its query string, safe to log.
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
