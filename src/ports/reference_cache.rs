//! Reference Data Cache Port - Short-lived cache for read models.
//!
//! Values are stored as JSON so one cache instance can hold any
//! serializable read model. Entries expire after their TTL and can be
//! invalidated explicitly after a successful write.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::HedgeRelationshipId;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("cache serialization failed: {0}")]
    Serialization(String),
}

/// Port for a keyed cache with per-entry TTL.
#[async_trait]
pub trait ReferenceDataCache: Send + Sync {
    /// Returns the cached value if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CacheError>;

    /// Stores `value` under `key` for `ttl`.
    async fn put(&self, key: &str, value: serde_json::Value, ttl: Duration)
        -> Result<(), CacheError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache key for the read model of one hedge relationship.
pub fn hedge_relationship_key(id: HedgeRelationshipId) -> String {
    format!("hedge_relationship:{}", id)
}
