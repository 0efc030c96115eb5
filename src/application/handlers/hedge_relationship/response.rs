//! CommandResponse - Uniform result envelope for lifecycle commands.

use serde::Serialize;

use crate::domain::foundation::ErrorCode;
use crate::domain::hedging::HedgeRelationshipError;

/// Outcome of a lifecycle command as seen by callers.
///
/// `error_messages` only ever holds user-safe text. `error_code` is kept
/// for transport mapping and is not serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse<T> {
    pub has_error: bool,
    pub error_messages: Vec<String>,
    pub warnings: Vec<String>,
    pub needs_confirmation: bool,
    pub data: Option<T>,
    #[serde(skip)]
    pub error_code: Option<ErrorCode>,
}

impl<T> CommandResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            has_error: false,
            error_messages: Vec::new(),
            warnings: Vec::new(),
            needs_confirmation: false,
            data: Some(data),
            error_code: None,
        }
    }

    pub fn failure(error: &HedgeRelationshipError) -> Self {
        Self {
            has_error: true,
            error_messages: error.user_messages(),
            warnings: Vec::new(),
            needs_confirmation: false,
            data: None,
            error_code: Some(error.code()),
        }
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Attaches a soft confirmation prompt, if any.
    pub fn with_confirmation(mut self, confirmation: Option<String>) -> Self {
        if let Some(message) = confirmation {
            self.needs_confirmation = true;
            self.warnings.push(message);
        }
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CommandResponse<U> {
        CommandResponse {
            has_error: self.has_error,
            error_messages: self.error_messages,
            warnings: self.warnings,
            needs_confirmation: self.needs_confirmation,
            data: self.data.map(f),
            error_code: self.error_code,
        }
    }
}
