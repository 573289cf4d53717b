//! HTTP client for the Star Wars API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use super::UpstreamClient;
use crate::error::UpstreamError;
use crate::resources::Record;

/// One page of a collection as returned by the API.
#[derive(Debug, Deserialize)]
struct CollectionPage {
    results: Vec<Record>,
}

/// [`UpstreamClient`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    http: Client,
    base_url: String,
}

impl SwapiClient {
    /// Builds a client for `base_url` (e.g. `https://swapi.dev/api`) with a
    /// per-request timeout. An expired timeout is reported as a fetch failure.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, kind: &str) -> String {
        format!("{}/{}/", self.base_url, kind)
    }

    fn resource_url(&self, kind: &str, id: &str) -> String {
        format!("{}/{}/{}/", self.base_url, kind, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(describe)?
            .error_for_status()
            .map_err(describe)?;

        response.json::<T>().await.map_err(describe)
    }
}

fn describe(err: reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if let Some(status) = err.status() {
        status.to_string()
    } else {
        err.to_string()
    }
}

#[async_trait]
impl UpstreamClient for SwapiClient {
    async fn fetch_collection(&self, kind: &str) -> Result<Vec<Record>, UpstreamError> {
        self.get_json::<CollectionPage>(&self.collection_url(kind))
            .await
            .map(|page| page.results)
            .map_err(|reason| {
                warn!("Failed to fetch {}: {}", kind, reason);
                UpstreamError::collection(kind, reason)
            })
    }

    async fn fetch_by_id(&self, kind: &str, id: &str) -> Result<Record, UpstreamError> {
        self.get_json::<Record>(&self.resource_url(kind, id))
            .await
            .map_err(|reason| {
                warn!("Failed to fetch {} with ID {}: {}", kind, id, reason);
                UpstreamError::resource(kind, id, reason)
            })
    }
}
