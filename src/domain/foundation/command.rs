//! Command infrastructure for lifecycle handlers.
//!
//! Every handler accepts a `CommandMetadata` alongside its command so that
//! correlation and audit context flows into logs without widening each
//! handler signature.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata context for command handlers.
///
/// Carries correlation and audit context through the command processing
/// pipeline. Authentication happens upstream, so `requested_by` is only
/// an opaque label for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CommandMetadata {
    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Who asked for this command (user name, service name).
    #[serde(skip_serializing_if = "Option::is_none")]
    requested_by: Option<String>,

    /// Source of this command (e.g., "api", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates empty command metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add requester label.
    pub fn with_requested_by(mut self, who: impl Into<String>) -> Self {
        self.requested_by = Some(who.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    ///
    /// Each call generates a fresh id when none was provided, so callers
    /// that need a stable value should read it once.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Returns the requester label if set.
    pub fn requested_by(&self) -> Option<&str> {
        self.requested_by.as_deref()
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Ensures a correlation id is present, generating one when missing.
    pub fn ensure_correlation_id(self) -> Self {
        if self.correlation_id.is_some() {
            self
        } else {
            let id = Uuid::new_v4().to_string();
            self.with_correlation_id(id)
        }
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture.
    pub fn test_fixture() -> Self {
        Self::new()
            .with_correlation_id("test-correlation-id")
            .with_requested_by("test-user")
            .with_source("test")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain_sets_all_fields() {
        let metadata = CommandMetadata::new()
            .with_correlation_id("corr-123")
            .with_requested_by("analyst")
            .with_source("api");

        assert_eq!(metadata.correlation_id_opt(), Some("corr-123"));
        assert_eq!(metadata.requested_by(), Some("analyst"));
        assert_eq!(metadata.source(), Some("api"));
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new();
        assert!(!metadata.correlation_id().is_empty());
        assert!(metadata.correlation_id_opt().is_none());
    }

    #[test]
    fn ensure_correlation_id_keeps_existing_value() {
        let metadata = CommandMetadata::new()
            .with_correlation_id("keep-me")
            .ensure_correlation_id();
        assert_eq!(metadata.correlation_id(), "keep-me");
    }

    #[test]
    fn ensure_correlation_id_makes_it_stable() {
        let metadata = CommandMetadata::new().ensure_correlation_id();
        assert_eq!(metadata.correlation_id(), metadata.correlation_id());
    }
}
