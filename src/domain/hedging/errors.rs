//! Hedge-relationship lifecycle errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 422 |
//! | InvalidTransition | 422 |
//! | Regression | 422 |
//! | NotFound | 404 |
//! | RemoteApi | 502 |
//! | Cancelled | 503 |
//! | Unexpected | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, HedgeRelationshipId};

use super::HedgeState;

/// Failure of a lifecycle command.
///
/// `Display` carries the full diagnostic detail for logs. What a user
/// sees comes from [`HedgeRelationshipError::user_messages`], which never
/// echoes a raw remote response body.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HedgeRelationshipError {
    /// One or more precondition rules failed. No remote call was made.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("hedge relationship {0} not found")]
    NotFound(HedgeRelationshipId),

    #[error("invalid state transition from {from} to {to}")]
    InvalidTransition { from: HedgeState, to: HedgeState },

    /// The accounting API answered with a non-success status.
    #[error("remote {operation} failed with status {status}: {body}")]
    RemoteApi {
        operation: String,
        status: u16,
        body: String,
    },

    /// Effectiveness testing reported failures. These messages come from
    /// the regression engine itself and are safe to show verbatim.
    #[error("regression failed: {}", .0.join("; "))]
    Regression(Vec<String>),

    #[error("operation cancelled")]
    Cancelled,

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl HedgeRelationshipError {
    pub fn validation(messages: Vec<String>) -> Self {
        HedgeRelationshipError::Validation(messages)
    }

    pub fn remote(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        HedgeRelationshipError::RemoteApi {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        HedgeRelationshipError::Unexpected(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            HedgeRelationshipError::Validation(_) => ErrorCode::ValidationFailed,
            HedgeRelationshipError::NotFound(_) => ErrorCode::HedgeRelationshipNotFound,
            HedgeRelationshipError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            HedgeRelationshipError::RemoteApi { .. } => ErrorCode::RemoteApiError,
            HedgeRelationshipError::Regression(_) => ErrorCode::RegressionFailed,
            HedgeRelationshipError::Cancelled => ErrorCode::Cancelled,
            HedgeRelationshipError::Unexpected(_) => ErrorCode::InternalError,
        }
    }

    /// Messages safe to return to the caller.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            HedgeRelationshipError::Validation(messages)
            | HedgeRelationshipError::Regression(messages) => messages.clone(),
            HedgeRelationshipError::NotFound(id) => {
                vec![format!("Hedge relationship {} was not found", id)]
            }
            HedgeRelationshipError::InvalidTransition { from, to } => vec![format!(
                "Hedge relationship cannot move from {} to {}",
                from, to
            )],
            HedgeRelationshipError::RemoteApi { operation, .. } => {
                vec![format!("Failed to {} hedge relationship", operation)]
            }
            HedgeRelationshipError::Cancelled => {
                vec!["The operation was cancelled".to_string()]
            }
            HedgeRelationshipError::Unexpected(_) => {
                vec!["An unexpected error occurred".to_string()]
            }
        }
    }

    /// True when the failure was decided locally, before any remote call.
    pub fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            HedgeRelationshipError::Validation(_) | HedgeRelationshipError::InvalidTransition { .. }
        )
    }
}

impl From<HedgeRelationshipError> for DomainError {
    fn from(err: HedgeRelationshipError) -> Self {
        let code = err.code();
        let mut domain = DomainError::new(code, err.user_messages().join("; "));
        if let HedgeRelationshipError::RemoteApi { status, .. } = &err {
            domain = domain.with_detail("status", status.to_string());
        }
        domain
    }
}
