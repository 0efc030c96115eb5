//! SaveHedgeRelationshipHandler - Create or update without a state change.
//!
//! New relationships are always created as Draft. Updates are only allowed
//! while the stored relationship is Draft, and the stored state always wins
//! over whatever state the caller sent.

use std::sync::Arc;

use crate::domain::foundation::CommandMetadata;
use crate::domain::hedging::{
    rules::SaveValidator, FieldCleanupNormalizer, HedgeRelationship, HedgeRelationshipError,
    HedgeState,
};
use crate::ports::{CancellationSignal, Clock, HedgeAccountingGateway, ReferenceDataCache};

use super::common::{ensure_not_cancelled, gateway_failure, invalidate_cached, load, reject_invalid};

pub(crate) fn save_requires_draft_message(state: HedgeState) -> String {
    format!(
        "Cannot edit hedge relationship in '{}' state. Only Draft relationships can be saved.",
        state
    )
}

#[derive(Debug, Clone)]
pub struct SaveHedgeRelationshipCommand {
    pub relationship: HedgeRelationship,
}

#[derive(Debug, Clone)]
pub struct SaveHedgeRelationshipResult {
    pub relationship: HedgeRelationship,
    pub created: bool,
    /// Soft warning raised by Save validation, if any.
    pub confirmation: Option<String>,
}

pub struct SaveHedgeRelationshipHandler {
    gateway: Arc<dyn HedgeAccountingGateway>,
    cache: Arc<dyn ReferenceDataCache>,
    clock: Arc<dyn Clock>,
    normalizer: FieldCleanupNormalizer,
}

impl SaveHedgeRelationshipHandler {
    pub fn new(
        gateway: Arc<dyn HedgeAccountingGateway>,
        cache: Arc<dyn ReferenceDataCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            cache,
            clock,
            normalizer: FieldCleanupNormalizer::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: SaveHedgeRelationshipCommand,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> Result<SaveHedgeRelationshipResult, HedgeRelationshipError> {
        let mut relationship = self.normalizer.normalized(&cmd.relationship);
        let id = relationship.id;
        let created = !id.is_persisted();
        let metadata = metadata.ensure_correlation_id();
        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            created,
            "Saving hedge relationship"
        );

        let report = SaveValidator::validate(&relationship, self.clock.today());
        reject_invalid(id, "save", &report)?;

        let saved = if created {
            relationship.hedge_state = HedgeState::Draft;
            ensure_not_cancelled(cancel)?;
            self.gateway
                .create(&relationship, cancel)
                .await
                .map_err(|e| gateway_failure("create", id, e))?
        } else {
            let stored = load(self.gateway.as_ref(), id, cancel).await?;
            if stored.hedge_state != HedgeState::Draft {
                let message = save_requires_draft_message(stored.hedge_state);
                tracing::warn!(
                    hedge_relationship_id = %id,
                    state = %stored.hedge_state,
                    "Save rejected for non-draft relationship"
                );
                return Err(HedgeRelationshipError::validation(vec![message]));
            }
            relationship.hedge_state = stored.hedge_state;
            ensure_not_cancelled(cancel)?;
            self.gateway
                .update(id, &relationship, cancel)
                .await
                .map_err(|e| gateway_failure("save", id, e))?
        };
        invalidate_cached(self.cache.as_ref(), saved.id).await;

        tracing::info!(
            hedge_relationship_id = %saved.id,
            correlation_id = %metadata.correlation_id(),
            "Hedge relationship saved"
        );

        Ok(SaveHedgeRelationshipResult {
            relationship: saved,
            created,
            confirmation: report.confirmation().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::hedge_relationship::test_support::{
        date, designatable, designated, test_clock, MockCache, MockGateway,
    };
    use crate::domain::foundation::{ClientId, ErrorCode};
    use crate::domain::hedging::{
        rules::THREE_MONTH_CONFIRMATION_MESSAGE, HedgeRiskType, HedgeType,
    };
    use crate::ports::{hedge_relationship_key, GatewayError};

    fn handler(gateway: Arc<MockGateway>, cache: Arc<MockCache>) -> SaveHedgeRelationshipHandler {
        SaveHedgeRelationshipHandler::new(gateway, cache, Arc::new(test_clock()))
    }

    #[tokio::test]
    async fn unsaved_relationship_is_created() {
        let gateway = Arc::new(MockGateway::new());
        let draft =
            HedgeRelationship::draft(ClientId::new(3), HedgeType::CashFlow, HedgeRiskType::InterestRate);

        let result = handler(gateway.clone(), Arc::new(MockCache::new()))
            .handle(
                SaveHedgeRelationshipCommand { relationship: draft },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap();

        assert!(result.created);
        assert!(result.relationship.id.is_persisted());
        assert_eq!(gateway.calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn new_relationship_is_always_created_as_draft() {
        let gateway = Arc::new(MockGateway::new());
        let mut draft =
            HedgeRelationship::draft(ClientId::new(3), HedgeType::CashFlow, HedgeRiskType::InterestRate);
        draft.hedge_state = HedgeState::Designated;

        let result = handler(gateway.clone(), Arc::new(MockCache::new()))
            .handle(
                SaveHedgeRelationshipCommand { relationship: draft },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap();

        assert_eq!(result.relationship.hedge_state, HedgeState::Draft);
        assert_eq!(gateway.last_sent().unwrap().hedge_state, HedgeState::Draft);
    }

    #[tokio::test]
    async fn update_keeps_stored_draft_state() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        let mut rel = designatable();
        rel.hedge_state = HedgeState::Designated;

        let result = handler(gateway.clone(), Arc::new(MockCache::new()))
            .handle(
                SaveHedgeRelationshipCommand { relationship: rel },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap();

        assert_eq!(result.relationship.hedge_state, HedgeState::Draft);
        assert_eq!(
            gateway.stored(designatable().id).unwrap().hedge_state,
            HedgeState::Draft
        );
        assert!(!gateway.calls().contains(&"regress"));
    }

    #[tokio::test]
    async fn designated_relationship_cannot_be_saved() {
        let gateway = Arc::new(MockGateway::with(designated()));
        let cache = Arc::new(MockCache::new());

        let err = handler(gateway.clone(), cache.clone())
            .handle(
                SaveHedgeRelationshipCommand {
                    relationship: designated(),
                },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            HedgeRelationshipError::Validation(vec![save_requires_draft_message(
                HedgeState::Designated
            )])
        );
        assert_eq!(gateway.calls(), vec!["get"]);
        assert!(cache.invalidated().is_empty());
    }

    #[tokio::test]
    async fn existing_relationship_is_updated_normalized() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        let cache = Arc::new(MockCache::new());
        let mut rel = designatable();
        rel.prospective_effectiveness_method_id = Some(0);
        rel.exposure_currency = Some("EUR".to_string());

        let result = handler(gateway.clone(), cache.clone())
            .handle(
                SaveHedgeRelationshipCommand { relationship: rel },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap();

        assert!(!result.created);
        let sent = gateway.last_sent().unwrap();
        assert_eq!(sent.prospective_effectiveness_method_id, None);
        assert_eq!(sent.exposure_currency, None);
        assert_eq!(gateway.calls(), vec!["get", "update"]);
        assert_eq!(cache.invalidated(), vec![hedge_relationship_key(designatable().id)]);
    }

    #[tokio::test]
    async fn close_dates_save_with_confirmation() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        let mut rel = designatable();
        rel.designation_date = Some(date(2024, 1, 1));
        rel.dedesignation_date = Some(date(2024, 2, 1));

        let result = handler(gateway, Arc::new(MockCache::new()))
            .handle(
                SaveHedgeRelationshipCommand { relationship: rel },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap();

        assert_eq!(
            result.confirmation.as_deref(),
            Some(THREE_MONTH_CONFIRMATION_MESSAGE)
        );
    }

    #[tokio::test]
    async fn invalid_relationship_is_not_sent() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        let mut rel = designatable();
        rel.dedesignation_date = rel.designation_date;

        let err = handler(gateway.clone(), Arc::new(MockCache::new()))
            .handle(
                SaveHedgeRelationshipCommand { relationship: rel },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, HedgeRelationshipError::Validation(_)));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn update_failure_reports_generic_message() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        gateway.fail("update", GatewayError::api(500, "SQL timeout"));

        let err = handler(gateway, Arc::new(MockCache::new()))
            .handle(
                SaveHedgeRelationshipCommand {
                    relationship: designatable(),
                },
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.user_messages(), vec!["Failed to save hedge relationship".to_string()]);
        assert_eq!(err.code(), ErrorCode::RemoteApiError);
    }
}
