//! ReDesignateHandler - Designated -> Designated (new cash-flow cycle).

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, HedgeRelationshipId};
use crate::domain::hedging::{
    rules::ReDesignateValidator, HedgeRelationship, HedgeRelationshipError, HedgeState,
    RedesignationTerms,
};
use crate::ports::{CancellationSignal, Clock, HedgeAccountingGateway, ReferenceDataCache};

use super::common::{
    ensure_edge, ensure_not_cancelled, gateway_failure, invalidate_cached, load, reject_invalid,
};

#[derive(Debug, Clone)]
pub struct ReDesignateCommand {
    pub hedge_relationship_id: HedgeRelationshipId,
    pub terms: RedesignationTerms,
}

#[derive(Debug, Clone)]
pub struct ReDesignateResult {
    pub relationship: HedgeRelationship,
}

pub struct ReDesignateHandler {
    gateway: Arc<dyn HedgeAccountingGateway>,
    cache: Arc<dyn ReferenceDataCache>,
    clock: Arc<dyn Clock>,
}

impl ReDesignateHandler {
    pub fn new(
        gateway: Arc<dyn HedgeAccountingGateway>,
        cache: Arc<dyn ReferenceDataCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            cache,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReDesignateCommand,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> Result<ReDesignateResult, HedgeRelationshipError> {
        let id = cmd.hedge_relationship_id;
        let metadata = metadata.ensure_correlation_id();
        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            "Re-designating hedge relationship"
        );

        let mut relationship = load(self.gateway.as_ref(), id, cancel).await?;

        let report = ReDesignateValidator::validate(&relationship, &cmd.terms, self.clock.today());
        reject_invalid(id, "redesignate", &report)?;
        ensure_edge(
            relationship.hedge_state,
            HedgeState::Designated,
            &[HedgeState::Designated],
        )?;

        relationship.stamp_redesignation(&cmd.terms);

        ensure_not_cancelled(cancel)?;
        let updated = self
            .gateway
            .redesignate(&relationship, cancel)
            .await
            .map_err(|e| gateway_failure("re-designate", id, e))?;
        invalidate_cached(self.cache.as_ref(), id).await;

        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            "Hedge relationship re-designated"
        );

        Ok(ReDesignateResult {
            relationship: updated,
        })
    }
}
