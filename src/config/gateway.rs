//! Hedge Accounting API gateway configuration

use std::time::Duration;

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Remote gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the Hedge Accounting API. When absent the in-memory
    /// gateway is used, which only makes sense outside production.
    pub base_url: Option<String>,

    /// Optional bearer token
    pub api_token: Option<Secret<String>>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when no remote API is configured.
    pub fn is_offline(&self) -> bool {
        self.base_url.as_deref().map_or(true, |url| url.trim().is_empty())
    }

    /// Validate gateway configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidGatewayTimeout);
        }

        let url = match self.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ if *environment == Environment::Production => {
                return Err(ValidationError::MissingRequired("gateway.base_url"))
            }
            _ => return Ok(()),
        };

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if *environment == Environment::Production && !url.starts_with("https://") {
            return Err(ValidationError::GatewayMustBeHttps);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
