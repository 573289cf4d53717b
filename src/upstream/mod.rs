//! Upstream Module
//!
//! Access to the remote catalog API. The services only see the
//! [`UpstreamClient`] trait; [`SwapiClient`] is the HTTP implementation.

mod swapi;

use async_trait::async_trait;

use crate::error::UpstreamError;
use crate::resources::Record;

pub use swapi::SwapiClient;

// == Upstream Client ==
/// Fetches raw records from the remote catalog.
///
/// Every call is a single attempt. Any failure, including not-found, is an
/// [`UpstreamError`].
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Fetches the first page of a named collection.
    async fn fetch_collection(&self, kind: &str) -> Result<Vec<Record>, UpstreamError>;

    /// Fetches one record by identifier.
    async fn fetch_by_id(&self, kind: &str, id: &str) -> Result<Record, UpstreamError>;
}
