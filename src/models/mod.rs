//! Request and Response models for the HTTP API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ListQuery, MAX_LIMIT};
pub use responses::{CharacterResponse, ErrorResponse, HealthResponse, StatsResponse};
