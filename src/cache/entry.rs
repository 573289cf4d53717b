//! Cache Entry Module
//!
//! Defines a stored cache row: the serialized value and when it was written.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A single cached value with its creation timestamp.
///
/// Entries carry no TTL of their own. Freshness is decided at read time
/// against the TTL the caller asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Serialized JSON payload
    pub value: String,
    /// When the value was written
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: String) -> Self {
        Self::with_created_at(value, Utc::now())
    }

    /// Creates an entry with an explicit creation time.
    pub fn with_created_at(value: String, created_at: DateTime<Utc>) -> Self {
        Self { value, created_at }
    }

    // == Expires At ==
    /// Returns `created_at + ttl`, or None when the sum is out of range
    /// (such entries never expire).
    pub fn expires_at(&self, ttl: Duration) -> Option<DateTime<Utc>> {
        chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
    }

    // == Is Fresh ==
    /// Checks whether the entry is still servable at `now`.
    ///
    /// Boundary condition: an entry is stale once `now >= created_at + ttl`,
    /// so a read at exactly the expiry instant is a miss.
    pub fn is_fresh_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match self.expires_at(ttl) {
            Some(expires) => now < expires,
            None => true,
        }
    }

    /// Same as [`is_fresh_at`](Self::is_fresh_at) using the current time.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.is_fresh_at(ttl, Utc::now())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(created_at: DateTime<Utc>) -> CacheEntry {
        CacheEntry::with_created_at("\"value\"".to_string(), created_at)
    }

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string());

        assert_eq!(entry.value, "test_value");
        assert!(entry.created_at <= Utc::now());
    }

    #[test]
    fn test_fresh_before_expiry() {
        let created = Utc::now();
        let entry = entry_at(created);
        let ttl = Duration::from_secs(60);

        assert!(entry.is_fresh_at(ttl, created));
        assert!(entry.is_fresh_at(ttl, created + chrono::Duration::seconds(59)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let created = Utc::now();
        let entry = entry_at(created);
        let ttl = Duration::from_secs(60);

        // A read at exactly created_at + ttl is already stale
        assert!(!entry.is_fresh_at(ttl, created + chrono::Duration::seconds(60)));
        assert!(!entry.is_fresh_at(ttl, created + chrono::Duration::seconds(61)));
    }

    #[test]
    fn test_zero_ttl_is_never_fresh() {
        let created = Utc::now();
        let entry = entry_at(created);

        assert!(!entry.is_fresh_at(Duration::ZERO, created));
    }

    #[test]
    fn test_ttl_is_seconds() {
        let created = Utc::now();
        let entry = entry_at(created);

        let expires = entry.expires_at(Duration::from_secs(86_400)).unwrap();
        assert_eq!(expires - created, chrono::Duration::days(1));
    }

    #[test]
    fn test_out_of_range_ttl_never_expires() {
        let entry = entry_at(Utc::now());

        assert!(entry.expires_at(Duration::MAX).is_none());
        assert!(entry.is_fresh(Duration::MAX));
    }
}
