//! Resources Module
//!
//! Records, the filter/paginate pipeline and the cached resource facade.

mod pipeline;
mod record;
mod service;

pub use pipeline::{apply_filter, apply_pagination, filter_and_paginate, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use record::{Record, ResourceKind};
pub use service::{list_cache_key, resource_cache_key, ResourceService};
