//! API Handlers
//!
//! HTTP request handlers for each endpoint. Handlers only parse input and
//! delegate to the services.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use crate::analytics::{AnalyticsService, WordCount};
use crate::cache::{CacheAside, CacheBackend, MemoryStore, SqliteStore};
use crate::config::{BackendKind, Config};
use crate::error::{Result, ServiceError};
use crate::models::{CharacterResponse, HealthResponse, ListQuery, StatsResponse};
use crate::resources::{Record, ResourceKind, ResourceService};
use crate::upstream::{SwapiClient, UpstreamClient};

/// Application state shared across all handlers.
///
/// Both services share one cache-aside engine and therefore one backend
/// and one set of statistics.
#[derive(Clone)]
pub struct AppState {
    pub resources: ResourceService,
    pub analytics: AnalyticsService,
    pub cache: CacheAside,
}

impl AppState {
    /// Wires the services around an already opened backend and upstream.
    pub fn new(
        backend: Arc<dyn CacheBackend>,
        upstream: Arc<dyn UpstreamClient>,
        ttl: Duration,
    ) -> Self {
        let cache = CacheAside::new(backend);
        Self {
            resources: ResourceService::new(upstream.clone(), cache.clone(), ttl),
            analytics: AnalyticsService::new(upstream, cache.clone(), ttl),
            cache,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the configured cache backend and builds the HTTP upstream client.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let backend: Arc<dyn CacheBackend> = match config.backend {
            BackendKind::Sqlite => Arc::new(SqliteStore::open(&config.database_path)?),
            BackendKind::Memory => Arc::new(MemoryStore::new()),
        };
        let upstream = Arc::new(SwapiClient::new(
            config.upstream_base_url.clone(),
            config.timeout(),
        )?);

        Ok(Self::new(backend, upstream, config.ttl()))
    }
}

fn parse_kind(kind: &str) -> Result<ResourceKind> {
    kind.parse().map_err(ServiceError::NotFound)
}

/// Handler for GET /:kind
///
/// Returns one filtered page of a resource collection. An unparsable query
/// string is reported as [`ServiceError::InvalidRequest`].
pub async fn list_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Record>>> {
    let kind = parse_kind(&kind)?;
    let Query(query) = query?;
    if let Some(error_msg) = query.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let records = state
        .resources
        .list_resource(kind, query.page, query.limit, query.filter())
        .await?;

    Ok(Json(records))
}

/// Handler for GET /:kind/:id
///
/// Returns a single resource by identifier.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Record>> {
    let kind = parse_kind(&kind)?;
    let record = state.resources.get_resource_by_id(kind, &id).await?;

    Ok(Json(record))
}

/// Handler for GET /analytics/unique-word-occurrences
pub async fn word_occurrences_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<WordCount>>> {
    Ok(Json(state.analytics.unique_word_occurrences().await?))
}

/// Handler for GET /analytics/most-frequent-character
pub async fn character_handler(State(state): State<AppState>) -> Result<Json<CharacterResponse>> {
    let name = state.analytics.most_frequent_character_name().await?;
    Ok(Json(CharacterResponse::new(name)))
}

/// Handler for GET /stats
///
/// Returns cache-aside statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::testing::StaticUpstream;
    use serde_json::json;

    fn state() -> AppState {
        let upstream = StaticUpstream::new().with_collection(
            "planets",
            vec![json!({"name": "Tatooine"}), json!({"name": "Alderaan"})],
        );
        AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(upstream),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_list_handler_filters() {
        let query = ListQuery {
            filter: Some("tatoo".into()),
            ..ListQuery::default()
        };
        let Json(records) = list_handler(State(state()), Path("planets".into()), Ok(Query(query)))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_name(), Some("Tatooine"));
    }

    #[tokio::test]
    async fn test_list_handler_unknown_kind() {
        let result = list_handler(
            State(state()),
            Path("people".into()),
            Ok(Query(ListQuery::default())),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_handler_rejects_large_limit() {
        let query = ListQuery {
            limit: 1000,
            ..ListQuery::default()
        };
        let result = list_handler(State(state()), Path("planets".into()), Ok(Query(query))).await;

        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_get_handler() {
        let Json(record) = get_handler(State(state()), Path(("planets".into(), "2".into())))
            .await
            .unwrap();

        assert_eq!(record.display_name(), Some("Alderaan"));
    }

    #[tokio::test]
    async fn test_stats_handler_counts_lookups() {
        let state = state();
        let _ = list_handler(
            State(state.clone()),
            Path("planets".into()),
            Ok(Query(ListQuery::default())),
        )
        .await
        .unwrap();

        let Json(stats) = stats_handler(State(state)).await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
