//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! plain records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for GET /analytics/most-frequent-character
#[derive(Debug, Clone, Serialize)]
pub struct CharacterResponse {
    /// Winning character name, null when the roster is empty
    pub name: Option<String>,
}

impl CharacterResponse {
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups served from cache
    pub hits: u64,
    /// Lookups with no entry or a stale entry
    pub misses: u64,
    /// Cached values that failed to decode
    pub invalid: u64,
    /// Backend read failures
    pub read_failures: u64,
    /// Backend write failures
    pub write_failures: u64,
    /// Hit rate (hits / lookups)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            invalid: stats.invalid,
            read_failures: stats.read_failures,
            write_failures: stats.write_failures,
        }
    }
}

/// Body of GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now(),
        }
    }
}

/// JSON body for every failed request: `{"error": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LookupOutcome;
    use serde_json::json;

    #[test]
    fn test_character_response_serialize() {
        let json = serde_json::to_string(&CharacterResponse::new(Some("Luke Skywalker".into()))).unwrap();
        assert_eq!(json, r#"{"name":"Luke Skywalker"}"#);

        let json = serde_json::to_string(&CharacterResponse::new(None)).unwrap();
        assert_eq!(json, r#"{"name":null}"#);
    }

    #[test]
    fn test_stats_response_from_stats() {
        let mut stats = CacheStats::new();
        for outcome in [LookupOutcome::Hit, LookupOutcome::Hit, LookupOutcome::Hit, LookupOutcome::Invalid] {
            stats.record(outcome);
        }
        stats.record_write_failure();

        let resp = StatsResponse::from(stats);
        assert_eq!(resp.hits, 3);
        assert_eq!(resp.invalid, 1);
        assert_eq!(resp.write_failures, 1);
        assert!((resp.hit_rate - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_health_timestamp_is_rfc3339() {
        let value = serde_json::to_value(HealthResponse::healthy()).unwrap();
        assert_eq!(value["status"], "healthy");

        let stamp = value["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_error_response_shape() {
        let value = serde_json::to_value(ErrorResponse::new("limit must not exceed 100")).unwrap();
        assert_eq!(value, json!({"error": "limit must not exceed 100"}));
    }
}
