//! Resource facade: cached, filtered and paginated views of the collections.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::{filter_and_paginate, Record, ResourceKind};
use crate::cache::CacheAside;
use crate::error::{Result, ServiceError};
use crate::upstream::UpstreamClient;

/// Cache key for a list view: `{kind}:{page}:{limit}:{filter}`.
pub fn list_cache_key(kind: ResourceKind, page: usize, limit: usize, filter: Option<&str>) -> String {
    format!("{}:{}:{}:{}", kind, page, limit, filter.unwrap_or(""))
}

/// Cache key for a single resource: `resourceById:{kind}:{id}`.
pub fn resource_cache_key(kind: ResourceKind, id: &str) -> String {
    format!("resourceById:{}:{}", kind, id)
}

// == Resource Service ==
/// Stateless facade over the upstream client and the cache-aside engine.
///
/// List views cache the filtered and paginated result per
/// `(kind, page, limit, filter)` combination, so every distinct uncached
/// combination re-fetches the whole collection.
#[derive(Clone)]
pub struct ResourceService {
    upstream: Arc<dyn UpstreamClient>,
    cache: CacheAside,
    ttl: Duration,
}

impl ResourceService {
    pub fn new(upstream: Arc<dyn UpstreamClient>, cache: CacheAside, ttl: Duration) -> Self {
        Self {
            upstream,
            cache,
            ttl,
        }
    }

    // == List Resource ==
    /// Returns one page of `kind`, filtered by display name.
    pub async fn list_resource(
        &self,
        kind: ResourceKind,
        page: usize,
        limit: usize,
        filter: Option<&str>,
    ) -> Result<Vec<Record>> {
        let key = list_cache_key(kind, page, limit, filter);

        self.cache
            .get_or_compute(&key, self.ttl, || async move {
                let records = self.upstream.fetch_collection(kind.as_str()).await?;
                let total = records.len();
                let page_records = filter_and_paginate(records, filter, page, limit);
                debug!(
                    "Fetched {} {}, serving {} after filter/paginate",
                    total,
                    kind,
                    page_records.len()
                );
                Ok::<_, ServiceError>(page_records)
            })
            .await
    }

    // == Get Resource By Id ==
    /// Returns a single record. Fetch failures are surfaced, never cached.
    pub async fn get_resource_by_id(&self, kind: ResourceKind, id: &str) -> Result<Record> {
        let key = resource_cache_key(kind, id);

        self.cache
            .get_or_compute(&key, self.ttl, || async move {
                Ok::<_, ServiceError>(self.upstream.fetch_by_id(kind.as_str(), id).await?)
            })
            .await
    }
}
