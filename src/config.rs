//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Where cached entries are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// SQLite database file
    Sqlite,
    /// Process memory, lost on restart
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(BackendKind::Sqlite),
            "memory" => Ok(BackendKind::Memory),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream catalog API, without trailing slash
    pub upstream_base_url: String,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// Cache TTL in seconds
    pub cache_ttl: u64,
    /// Cache storage backend
    pub backend: BackendKind,
    /// SQLite database path
    pub database_path: String,
    /// Retention sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_BASE_URL` - Upstream API base URL (default: https://swapi.dev/api)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 86400)
    /// - `DB_TYPE` - `sqlite` or `memory` (default: sqlite)
    /// - `DB_DATABASE` - SQLite database path (default: ./data/database.db)
    /// - `CLEANUP_INTERVAL` - Retention sweep frequency in seconds (default: 3600)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            backend: parse_var("DB_TYPE").unwrap_or(defaults.backend),
            database_path: env::var("DB_DATABASE").unwrap_or(defaults.database_path),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Cache TTL as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Upstream timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upstream_base_url: "https://swapi.dev/api".to_string(),
            upstream_timeout: 10,
            cache_ttl: 86_400,
            backend: BackendKind::Sqlite,
            database_path: "./data/database.db".to_string(),
            cleanup_interval: 3600,
        }
    }
}
