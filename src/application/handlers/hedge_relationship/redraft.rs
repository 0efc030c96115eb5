//! RedraftHandler - {Designated, Dedesignated} -> Draft.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, HedgeRelationshipId};
use crate::domain::hedging::{
    rules::RedraftValidator, HedgeRelationship, HedgeRelationshipError, HedgeState,
};
use crate::ports::{CancellationSignal, HedgeAccountingGateway, ReferenceDataCache};

use super::common::{
    ensure_edge, ensure_not_cancelled, gateway_failure, invalidate_cached, load, reject_invalid,
};

#[derive(Debug, Clone)]
pub struct RedraftCommand {
    pub hedge_relationship_id: HedgeRelationshipId,
}

#[derive(Debug, Clone)]
pub struct RedraftResult {
    pub relationship: HedgeRelationship,
}

pub struct RedraftHandler {
    gateway: Arc<dyn HedgeAccountingGateway>,
    cache: Arc<dyn ReferenceDataCache>,
}

impl RedraftHandler {
    pub fn new(
        gateway: Arc<dyn HedgeAccountingGateway>,
        cache: Arc<dyn ReferenceDataCache>,
    ) -> Self {
        Self { gateway, cache }
    }

    pub async fn handle(
        &self,
        cmd: RedraftCommand,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> Result<RedraftResult, HedgeRelationshipError> {
        let id = cmd.hedge_relationship_id;
        let metadata = metadata.ensure_correlation_id();
        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            "Redrafting hedge relationship"
        );

        let relationship = load(self.gateway.as_ref(), id, cancel).await?;

        reject_invalid(id, "redraft", &RedraftValidator::validate(&relationship))?;
        ensure_edge(
            relationship.hedge_state,
            HedgeState::Draft,
            &[HedgeState::Designated, HedgeState::Dedesignated],
        )?;

        ensure_not_cancelled(cancel)?;
        let updated = self
            .gateway
            .redraft(&relationship, cancel)
            .await
            .map_err(|e| gateway_failure("redraft", id, e))?;
        invalidate_cached(self.cache.as_ref(), id).await;

        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            "Hedge relationship redrafted"
        );

        Ok(RedraftResult {
            relationship: updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::hedge_relationship::test_support::{
        designatable, designated, MockCache, MockGateway,
    };

    #[tokio::test]
    async fn dedesignated_relationship_returns_to_draft() {
        let mut rel = designated();
        rel.hedge_state = HedgeState::Dedesignated;
        let gateway = Arc::new(MockGateway::with(rel));
        let cache = Arc::new(MockCache::new());

        let result = RedraftHandler::new(gateway.clone(), cache.clone())
            .handle(
                RedraftCommand {
                    hedge_relationship_id: designated().id,
                },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap();

        assert_eq!(result.relationship.hedge_state, HedgeState::Draft);
        assert_eq!(gateway.calls(), vec!["get", "redraft"]);
        assert_eq!(cache.invalidated().len(), 1);
    }

    #[tokio::test]
    async fn draft_relationship_cannot_be_redrafted() {
        let gateway = Arc::new(MockGateway::with(designatable()));

        let err = RedraftHandler::new(gateway.clone(), Arc::new(MockCache::new()))
            .handle(
                RedraftCommand {
                    hedge_relationship_id: designatable().id,
                },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, HedgeRelationshipError::Validation(_)));
        assert_eq!(gateway.calls(), vec!["get"]);
    }

    #[tokio::test]
    async fn missing_relationship_is_not_found() {
        let gateway = Arc::new(MockGateway::new());

        let err = RedraftHandler::new(gateway, Arc::new(MockCache::new()))
            .handle(
                RedraftCommand {
                    hedge_relationship_id: HedgeRelationshipId::new(404),
                },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, HedgeRelationshipError::NotFound(HedgeRelationshipId::new(404)));
    }
}
