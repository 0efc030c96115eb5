//! Helpers shared by the lifecycle handlers.

use crate::domain::foundation::{HedgeRelationshipId, StateMachine};
use crate::domain::hedging::{HedgeRelationship, HedgeRelationshipError, HedgeState, ValidationReport};
use crate::ports::{
    hedge_relationship_key, CancellationSignal, GatewayError, HedgeAccountingGateway,
    ReferenceDataCache,
};

/// Translates a gateway failure for `operation` into a lifecycle error,
/// logging the full remote detail.
pub(crate) fn gateway_failure(
    operation: &str,
    id: HedgeRelationshipId,
    err: GatewayError,
) -> HedgeRelationshipError {
    match err {
        GatewayError::Api { status, body } => {
            tracing::error!(
                hedge_relationship_id = %id,
                operation,
                status,
                body = %body,
                "Remote hedge accounting call failed"
            );
            HedgeRelationshipError::remote(operation, status, body)
        }
        GatewayError::NotFound(missing) => HedgeRelationshipError::NotFound(missing),
        GatewayError::Cancelled => {
            tracing::warn!(hedge_relationship_id = %id, operation, "Remote call cancelled");
            HedgeRelationshipError::Cancelled
        }
        other => {
            tracing::error!(
                hedge_relationship_id = %id,
                operation,
                error = %other,
                "Unexpected failure calling hedge accounting API"
            );
            HedgeRelationshipError::unexpected(other.to_string())
        }
    }
}

/// Fails fast when cancellation was requested before the next step.
pub(crate) fn ensure_not_cancelled(
    cancel: &CancellationSignal,
) -> Result<(), HedgeRelationshipError> {
    cancel.check().map_err(|_| HedgeRelationshipError::Cancelled)
}

/// Loads the current relationship from the gateway.
pub(crate) async fn load(
    gateway: &dyn HedgeAccountingGateway,
    id: HedgeRelationshipId,
    cancel: &CancellationSignal,
) -> Result<HedgeRelationship, HedgeRelationshipError> {
    ensure_not_cancelled(cancel)?;
    gateway
        .get(id, cancel)
        .await
        .map_err(|e| gateway_failure("load", id, e))
}

/// Rejects a transition whose source state is not one of `sources` or
/// whose edge is not in the lifecycle graph.
pub(crate) fn ensure_edge(
    from: HedgeState,
    to: HedgeState,
    sources: &[HedgeState],
) -> Result<(), HedgeRelationshipError> {
    if sources.contains(&from) && from.can_transition_to(&to) {
        Ok(())
    } else {
        Err(HedgeRelationshipError::InvalidTransition { from, to })
    }
}

/// Drops the cached read model after a successful write. Cache failures
/// are logged and otherwise ignored.
pub(crate) async fn invalidate_cached(cache: &dyn ReferenceDataCache, id: HedgeRelationshipId) {
    let key = hedge_relationship_key(id);
    if let Err(e) = cache.invalidate(&key).await {
        tracing::warn!(key = %key, error = %e, "Failed to invalidate cached hedge relationship");
    }
}

/// Converts a rule-set report into a validation error when it has errors.
pub(crate) fn reject_invalid(
    id: HedgeRelationshipId,
    operation: &str,
    report: &ValidationReport,
) -> Result<(), HedgeRelationshipError> {
    if report.is_valid() {
        return Ok(());
    }
    tracing::warn!(
        hedge_relationship_id = %id,
        operation,
        errors = ?report.errors(),
        "Validation failed"
    );
    Err(HedgeRelationshipError::validation(report.errors().to_vec()))
}
