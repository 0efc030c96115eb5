//! RegressionRunner - Invokes remote effectiveness testing.

use std::sync::Arc;

use crate::domain::hedging::{HedgeRelationship, HedgeRelationshipError, HedgeResultType};
use crate::ports::{CancellationSignal, GatewayError, HedgeAccountingGateway, RegressionPayload};

use super::common::{ensure_not_cancelled, gateway_failure};

const GENERIC_REGRESSION_FAILURE: &str = "Regression failed";

/// Sends a minimal payload to the regression endpoint and interprets the
/// outcome. Does not retry.
pub struct RegressionRunner {
    gateway: Arc<dyn HedgeAccountingGateway>,
}

impl RegressionRunner {
    pub fn new(gateway: Arc<dyn HedgeAccountingGateway>) -> Self {
        Self { gateway }
    }

    /// Runs regression for `relationship` and returns the gateway's updated
    /// view of it.
    ///
    /// A 4xx response carrying structured messages, or a failed batch among
    /// those this call appended, fails with
    /// [`HedgeRelationshipError::Regression`]. Any other error response is a
    /// [`HedgeRelationshipError::RemoteApi`], whose body never reaches users.
    pub async fn run(
        &self,
        relationship: &HedgeRelationship,
        result_type: HedgeResultType,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, HedgeRelationshipError> {
        ensure_not_cancelled(cancel)?;
        let id = relationship.id;
        let payload = RegressionPayload::from_relationship(relationship);
        let known = relationship.regression_count(result_type);

        tracing::info!(
            hedge_relationship_id = %id,
            result_type = %result_type,
            "Running regression"
        );

        let updated = match self.gateway.regress(result_type, &payload, cancel).await {
            Ok(updated) => updated,
            Err(GatewayError::Api { status, body }) => {
                let messages = if (400..500).contains(&status) {
                    decode_error_messages(&body)
                } else {
                    Vec::new()
                };
                tracing::error!(
                    hedge_relationship_id = %id,
                    status,
                    body = %body,
                    "Regression request failed"
                );
                if messages.is_empty() {
                    return Err(HedgeRelationshipError::remote("run regression for", status, body));
                }
                return Err(HedgeRelationshipError::Regression(messages));
            }
            Err(other) => return Err(gateway_failure("run regression for", id, other)),
        };

        let failures: Vec<String> = updated
            .regressions_after(result_type, known)
            .into_iter()
            .filter(|batch| !batch.succeeded())
            .map(|batch| {
                let message = batch
                    .error_message
                    .clone()
                    .unwrap_or_else(|| GENERIC_REGRESSION_FAILURE.to_string());
                tracing::warn!(
                    hedge_relationship_id = %id,
                    value_date = %batch.value_date,
                    error_message = %message,
                    "Regression batch reported failure"
                );
                message
            })
            .collect();
        if !failures.is_empty() {
            return Err(HedgeRelationshipError::Regression(failures));
        }

        Ok(updated)
    }
}

/// Extracts display messages from a structured remote error body.
///
/// Accepts a JSON array of strings, or a JSON object with an `errors`
/// collection or an `ErrorMessage`/`message` string. Plain text and other
/// shapes yield nothing.
pub fn decode_error_messages(body: &str) -> Vec<String> {
    match serde_json::from_str::<serde_json::Value>(body.trim()) {
        Ok(value) => messages_from_json(&value),
        Err(_) => Vec::new(),
    }
}

fn messages_from_json(value: &serde_json::Value) -> Vec<String> {
    use serde_json::Value;

    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .filter_map(non_blank)
            .collect(),
        Value::Object(map) => {
            for key in ["errors", "Errors"] {
                if let Some(errors) = map.get(key) {
                    let messages: Vec<String> = match errors {
                        Value::Object(fields) => fields.values().flat_map(messages_from_json).collect(),
                        Value::String(s) => non_blank(s).into_iter().collect(),
                        other => messages_from_json(other),
                    };
                    if !messages.is_empty() {
                        return messages;
                    }
                }
            }
            ["ErrorMessage", "errorMessage", "message", "Message"]
                .iter()
                .filter_map(|key| map.get(*key).and_then(|v| v.as_str()))
                .find_map(non_blank)
                .into_iter()
                .collect()
        }
        _ => Vec::new(),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
