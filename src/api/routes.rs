//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    character_handler, get_handler, health_handler, list_handler, stats_handler,
    word_occurrences_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /:kind` - Filtered, paginated collection (films, species, vehicles, starships, planets)
/// - `GET /:kind/:id` - Single resource
/// - `GET /analytics/unique-word-occurrences` - Word counts over opening crawls
/// - `GET /analytics/most-frequent-character` - Most mentioned character
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route(
            "/analytics/unique-word-occurrences",
            get(word_occurrences_handler),
        )
        .route("/analytics/most-frequent-character", get(character_handler))
        .route("/:kind", get(list_handler))
        .route("/:kind/:id", get(get_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::upstream::testing::StaticUpstream;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let upstream = StaticUpstream::new().with_collection(
            "films",
            vec![json!({"title": "A New Hope", "opening_crawl": "It is a period of civil war."})],
        );
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(upstream),
            Duration::from_secs(300),
        );
        create_router(state)
    }

    async fn status_of(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(status_of("/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_collection_endpoint() {
        assert_eq!(status_of("/films?page=1&limit=5").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analytics_route_is_not_a_resource() {
        assert_eq!(
            status_of("/analytics/unique-word-occurrences").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_unknown_kind_not_found() {
        assert_eq!(status_of("/droids").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_page_is_rejected() {
        assert_eq!(status_of("/films?page=abc").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparsable_query_has_json_error_body() {
        for uri in ["/films?page=abc", "/films?limit=-1"] {
            let response = create_test_app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            let message = body["error"].as_str().unwrap();
            assert!(message.starts_with("Invalid request:"), "{}", message);
        }
    }
}
