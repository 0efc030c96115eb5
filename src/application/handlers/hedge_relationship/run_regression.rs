//! RunRegressionHandler - Standalone effectiveness testing.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, HedgeRelationshipId};
use crate::domain::hedging::{
    rules::RegressionRequirementsValidator, HedgeRelationship, HedgeRelationshipError,
    HedgeResultType,
};
use crate::ports::{CancellationSignal, HedgeAccountingGateway, ReferenceDataCache};

use super::common::{invalidate_cached, load, reject_invalid};
use super::RegressionRunner;

pub(crate) const UNSAVED_REGRESSION_MESSAGE: &str =
    "Hedge relationship must be saved before running regression";

pub(crate) const MISMATCHED_ID_MESSAGE: &str =
    "Hedge relationship ID in the request body does not match the requested relationship";

#[derive(Debug, Clone)]
pub struct RunRegressionCommand {
    pub hedge_relationship_id: HedgeRelationshipId,
    /// Caller's copy of the entity; loaded from the gateway when absent.
    pub relationship: Option<HedgeRelationship>,
    pub result_type: HedgeResultType,
}

#[derive(Debug, Clone)]
pub struct RunRegressionResult {
    pub relationship: HedgeRelationship,
}

pub struct RunRegressionHandler {
    gateway: Arc<dyn HedgeAccountingGateway>,
    cache: Arc<dyn ReferenceDataCache>,
    runner: RegressionRunner,
}

impl RunRegressionHandler {
    pub fn new(
        gateway: Arc<dyn HedgeAccountingGateway>,
        cache: Arc<dyn ReferenceDataCache>,
    ) -> Self {
        Self {
            runner: RegressionRunner::new(gateway.clone()),
            gateway,
            cache,
        }
    }

    pub async fn handle(
        &self,
        cmd: RunRegressionCommand,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> Result<RunRegressionResult, HedgeRelationshipError> {
        let id = cmd.hedge_relationship_id;
        let metadata = metadata.ensure_correlation_id();
        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            result_type = %cmd.result_type,
            "Running hedge regression"
        );

        if !id.is_persisted() {
            return Err(HedgeRelationshipError::validation(vec![
                UNSAVED_REGRESSION_MESSAGE.to_string(),
            ]));
        }

        let relationship = match cmd.relationship {
            Some(relationship) if relationship.id.is_persisted() && relationship.id != id => {
                tracing::warn!(
                    hedge_relationship_id = %id,
                    body_id = %relationship.id,
                    "Regression body targets a different relationship"
                );
                return Err(HedgeRelationshipError::validation(vec![
                    MISMATCHED_ID_MESSAGE.to_string(),
                ]));
            }
            Some(mut relationship) => {
                relationship.id = id;
                relationship
            }
            None => load(self.gateway.as_ref(), id, cancel).await?,
        };

        reject_invalid(
            id,
            "regression",
            &RegressionRequirementsValidator::validate(&relationship),
        )?;

        // A failed run may still have appended a batch remotely.
        let outcome = self.runner.run(&relationship, cmd.result_type, cancel).await;
        invalidate_cached(self.cache.as_ref(), id).await;
        let updated = outcome?;

        Ok(RunRegressionResult {
            relationship: updated,
        })
    }
}
