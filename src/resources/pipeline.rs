//! Filter/paginate pipeline.
//!
//! Pure functions over an in-memory record sequence. No I/O.

use super::Record;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Keeps records whose display name contains `filter`, ignoring case.
///
/// A missing or empty filter keeps everything, including records without a
/// display name. With an active filter those records never match.
pub fn apply_filter(records: Vec<Record>, filter: Option<&str>) -> Vec<Record> {
    let needle = match filter {
        Some(text) if !text.is_empty() => text.to_lowercase(),
        _ => return records,
    };

    records
        .into_iter()
        .filter(|record| {
            record
                .display_name()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Returns the half-open slice `[(page-1)*limit, page*limit)` clamped to the
/// input length. Page numbers start at 1; page 0 and out-of-range pages
/// yield an empty vector.
pub fn apply_pagination(records: Vec<Record>, page: usize, limit: usize) -> Vec<Record> {
    if page == 0 {
        return Vec::new();
    }

    let start = (page - 1).saturating_mul(limit).min(records.len());
    let end = page.saturating_mul(limit).min(records.len());

    records.into_iter().skip(start).take(end - start).collect()
}

/// Filters, then paginates. Order-preserving.
pub fn filter_and_paginate(
    records: Vec<Record>,
    filter: Option<&str>,
    page: usize,
    limit: usize,
) -> Vec<Record> {
    apply_pagination(apply_filter(records, filter), page, limit)
}
