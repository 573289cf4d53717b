//! Error types for the cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Upstream Error ==
/// Failure talking to the remote catalog API.
///
/// Any transport failure, timeout, non-success status or malformed body ends
/// up here. Upstream errors are never retried and never cached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Fetching a whole collection failed
    #[error("Failed to fetch {kind} from upstream: {reason}")]
    Collection { kind: String, reason: String },

    /// Fetching a single resource failed (including not-found)
    #[error("Failed to fetch {kind} with ID {id} from upstream: {reason}")]
    Resource {
        kind: String,
        id: String,
        reason: String,
    },
}

impl UpstreamError {
    pub fn collection(kind: impl Into<String>, reason: impl ToString) -> Self {
        Self::Collection {
            kind: kind.into(),
            reason: reason.to_string(),
        }
    }

    pub fn resource(kind: impl Into<String>, id: impl Into<String>, reason: impl ToString) -> Self {
        Self::Resource {
            kind: kind.into(),
            id: id.into(),
            reason: reason.to_string(),
        }
    }
}

// == Cache Error ==
/// Cache malfunctions. These are always recovered from inside the
/// cache-aside engine and never surface to callers of the services.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend could not be read
    #[error("Cache read failed: {0}")]
    Read(String),

    /// The backend rejected an upsert
    #[error("Cache write failed: {0}")]
    Write(String),

    /// A stored value could not be decoded into the requested type
    #[error("Cached value could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// A fresh value could not be encoded for storage
    #[error("Value could not be encoded for caching: {0}")]
    Encode(#[source] serde_json::Error),
}

// == Service Error ==
/// Errors returned by the resource and analytics services.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Upstream fetch failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown route target, e.g. an unsupported resource kind
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the services.
pub type Result<T> = std::result::Result<T, ServiceError>;
