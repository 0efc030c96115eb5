//! Reference data cache configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

const MAX_TTL_SECS: u64 = 86_400;

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime in seconds; 0 disables caching of reads
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs > MAX_TTL_SECS {
            return Err(ValidationError::CacheTtlTooLarge);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}
