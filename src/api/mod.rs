//! API Module
//!
//! HTTP handlers and routing for the REST API.
//!
//! # Endpoints
//! - `GET /:kind` - Filtered, paginated resource collection
//! - `GET /:kind/:id` - Single resource
//! - `GET /analytics/unique-word-occurrences` - Word frequency over opening crawls
//! - `GET /analytics/most-frequent-character` - Most mentioned character
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
