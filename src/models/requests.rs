//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

use crate::resources::{DEFAULT_LIMIT, DEFAULT_PAGE};

/// Largest accepted page size
pub const MAX_LIMIT: usize = 100;

/// Query string for the collection endpoints (GET /films etc.)
///
/// # Fields
/// - `page`: 1-based page number (default 1)
/// - `limit`: page size (default 10)
/// - `param`: case-insensitive title/name filter, also accepted as `filter`
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default, rename = "param", alias = "filter")]
    pub filter: Option<String>,
}

fn default_page() -> usize {
    DEFAULT_PAGE
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            filter: None,
        }
    }
}

impl ListQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.limit > MAX_LIMIT {
            return Some(format!("limit must not exceed {}", MAX_LIMIT));
        }
        None
    }

    /// The filter text, with an empty value treated as absent.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref().filter(|text| !text.is_empty())
    }
}
