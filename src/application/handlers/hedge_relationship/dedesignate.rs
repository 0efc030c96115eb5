//! DeDesignateHandler - Designated -> Dedesignated.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, HedgeRelationshipId};
use crate::domain::hedging::{
    rules::DeDesignateValidator, DedesignationTerms, HedgeRelationship, HedgeRelationshipError,
    HedgeState,
};
use crate::ports::{CancellationSignal, Clock, HedgeAccountingGateway, ReferenceDataCache};

use super::common::{
    ensure_edge, ensure_not_cancelled, gateway_failure, invalidate_cached, load, reject_invalid,
};

#[derive(Debug, Clone)]
pub struct DeDesignateCommand {
    pub hedge_relationship_id: HedgeRelationshipId,
    pub terms: DedesignationTerms,
}

#[derive(Debug, Clone)]
pub struct DeDesignateResult {
    pub relationship: HedgeRelationship,
    /// Soft warning the caller was expected to confirm (early de-designation).
    pub confirmation: Option<String>,
}

pub struct DeDesignateHandler {
    gateway: Arc<dyn HedgeAccountingGateway>,
    cache: Arc<dyn ReferenceDataCache>,
    clock: Arc<dyn Clock>,
}

impl DeDesignateHandler {
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
        cmd: DeDesignateCommand,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> Result<DeDesignateResult, HedgeRelationshipError> {
        let id = cmd.hedge_relationship_id;
        let metadata = metadata.ensure_correlation_id();
        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            "De-designating hedge relationship"
        );

        let mut relationship = load(self.gateway.as_ref(), id, cancel).await?;

        let report = DeDesignateValidator::validate(
            &relationship,
            cmd.terms.dedesignation_date,
            cmd.terms.reason,
            self.clock.today(),
        );
        reject_invalid(id, "dedesignate", &report)?;
        ensure_edge(
            relationship.hedge_state,
            HedgeState::Dedesignated,
            &[HedgeState::Designated],
        )?;

        relationship.stamp_dedesignation(&cmd.terms);

        ensure_not_cancelled(cancel)?;
        let updated = self
            .gateway
            .dedesignate(&relationship, cancel)
            .await
            .map_err(|e| gateway_failure("de-designate", id, e))?;
        invalidate_cached(self.cache.as_ref(), id).await;

        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            "Hedge relationship de-designated"
        );

        Ok(DeDesignateResult {
            relationship: updated,
            confirmation: report.confirmation().map(str::to_string),
        })
    }
}
