//! DesignateHandler - Draft -> Designated.
//!
//! Ordered side effects, each taking the entity produced by the step before:
//!
//! 1. Load the current entity and normalize it
//! 2. Run Inception regression; a failure aborts before any package exists
//! 3. Check analytics availability; a failure here is only a warning
//! 4. Generate the inception package (non-preview)
//! 5. Reload to capture remote-side state changes
//!
//! Completed remote steps are not rolled back when a later step fails.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, HedgeRelationshipId};
use crate::domain::hedging::{
    rules::DesignationRequirementsValidator, FieldCleanupNormalizer, HedgeRelationship,
    HedgeRelationshipError, HedgeResultType, HedgeState,
};
use crate::ports::{
    CancellationSignal, Clock, HedgeAccountingGateway, InceptionPackage, ReferenceDataCache,
};

use super::common::{ensure_edge, ensure_not_cancelled, invalidate_cached, load, reject_invalid};
use super::{InceptionPackageGenerator, RegressionRunner};

pub const ANALYTICS_UNAVAILABLE_WARNING: &str =
    "Analytics service is unavailable; effectiveness results may be incomplete";

#[derive(Debug, Clone)]
pub struct DesignateCommand {
    pub hedge_relationship_id: HedgeRelationshipId,
}

#[derive(Debug, Clone)]
pub struct DesignateResult {
    pub relationship: HedgeRelationship,
    pub package: InceptionPackage,
    pub warnings: Vec<String>,
}

pub struct DesignateHandler {
    gateway: Arc<dyn HedgeAccountingGateway>,
    cache: Arc<dyn ReferenceDataCache>,
    clock: Arc<dyn Clock>,
    regression: RegressionRunner,
    packages: InceptionPackageGenerator,
    normalizer: FieldCleanupNormalizer,
}

impl DesignateHandler {
    pub fn new(
        gateway: Arc<dyn HedgeAccountingGateway>,
        cache: Arc<dyn ReferenceDataCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            regression: RegressionRunner::new(gateway.clone()),
            packages: InceptionPackageGenerator::new(gateway.clone()),
            gateway,
            cache,
            clock,
            normalizer: FieldCleanupNormalizer::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: DesignateCommand,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> Result<DesignateResult, HedgeRelationshipError> {
        let id = cmd.hedge_relationship_id;
        let metadata = metadata.ensure_correlation_id();
        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            "Designating hedge relationship"
        );

        // 1. Load and normalize
        let mut relationship = load(self.gateway.as_ref(), id, cancel).await?;
        self.normalizer.apply(&mut relationship);

        let report = DesignationRequirementsValidator::validate(&relationship, self.clock.today());
        reject_invalid(id, "designate", &report)?;
        ensure_edge(
            relationship.hedge_state,
            HedgeState::Designated,
            &[HedgeState::Draft],
        )?;

        // Steps 2-4 may leave remote writes behind even when one of them
        // fails, so the cached copy is dropped either way.
        let outcome = self.regress_and_package(&relationship, cancel).await;
        invalidate_cached(self.cache.as_ref(), id).await;
        let (package, warnings) = outcome?;

        // 5. Reload
        let refreshed = load(self.gateway.as_ref(), id, cancel).await?;

        tracing::info!(
            hedge_relationship_id = %id,
            correlation_id = %metadata.correlation_id(),
            state = %refreshed.hedge_state,
            "Hedge relationship designated"
        );

        Ok(DesignateResult {
            relationship: refreshed,
            package,
            warnings,
        })
    }

    async fn regress_and_package(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<(InceptionPackage, Vec<String>), HedgeRelationshipError> {
        let id = relationship.id;

        // 2. Inception regression
        let mut regressed = self
            .regression
            .run(relationship, HedgeResultType::Inception, cancel)
            .await?;

        // 3. Analytics availability (informational)
        let mut warnings = Vec::new();
        ensure_not_cancelled(cancel)?;
        match self.gateway.is_analytics_available(cancel).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(hedge_relationship_id = %id, "Analytics service reported unavailable");
                warnings.push(ANALYTICS_UNAVAILABLE_WARNING.to_string());
            }
            Err(e) => {
                tracing::warn!(
                    hedge_relationship_id = %id,
                    error = %e,
                    "Analytics availability check failed"
                );
                warnings.push(ANALYTICS_UNAVAILABLE_WARNING.to_string());
            }
        }

        // 4. Inception package, from the regressed entity
        self.normalizer.apply(&mut regressed);
        let package = self.packages.generate(&regressed, false, cancel).await?;

        Ok((package, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::hedge_relationship::test_support::{
        date, designatable, designated, failed_batch, test_clock, MockCache, MockGateway,
    };
    use crate::domain::hedging::HedgeRegressionBatch;
    use crate::ports::{hedge_relationship_key, GatewayError};

    fn handler(gateway: Arc<MockGateway>, cache: Arc<MockCache>) -> DesignateHandler {
        DesignateHandler::new(gateway, cache, Arc::new(test_clock()))
    }

    fn command() -> DesignateCommand {
        DesignateCommand {
            hedge_relationship_id: designatable().id,
        }
    }

    #[tokio::test]
    async fn runs_steps_in_order() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        let cache = Arc::new(MockCache::new());

        let result = handler(gateway.clone(), cache.clone())
            .handle(command(), CommandMetadata::test_fixture(), &CancellationSignal::never())
            .await
            .unwrap();

        assert_eq!(
            gateway.calls(),
            vec![
                "get",
                "regress",
                "is_analytics_available",
                "generate_inception_package",
                "get"
            ]
        );
        assert_eq!(gateway.previews(), vec![false]);
        assert_eq!(result.relationship.hedge_state, HedgeState::Designated);
        assert!(result.warnings.is_empty());
        assert_eq!(cache.invalidated(), vec![hedge_relationship_key(designatable().id)]);
    }

    #[tokio::test]
    async fn failing_regression_never_produces_a_package() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        gateway.set_regression_batch(failed_batch("R-squared below threshold"));
        let cache = Arc::new(MockCache::new());

        let err = handler(gateway.clone(), cache.clone())
            .handle(command(), CommandMetadata::test_fixture(), &CancellationSignal::never())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            HedgeRelationshipError::Regression(vec!["R-squared below threshold".to_string()])
        );
        assert!(!gateway.calls().contains(&"generate_inception_package"));
        assert_eq!(cache.invalidated(), vec![hedge_relationship_key(designatable().id)]);
    }

    #[tokio::test]
    async fn new_failing_batch_wins_over_later_dated_history() {
        let mut rel = designatable();
        rel.hedge_regression_batches.push(HedgeRegressionBatch {
            value_date: date(2024, 9, 30),
            slope: -1.01,
            r_squared: 0.96,
            hedge_result_type: HedgeResultType::Inception,
            error_message: None,
        });
        let gateway = Arc::new(MockGateway::with(rel));
        gateway.set_regression_batch(HedgeRegressionBatch {
            value_date: date(2024, 6, 30),
            ..failed_batch("R-squared below 0.8")
        });

        let err = handler(gateway.clone(), Arc::new(MockCache::new()))
            .handle(command(), CommandMetadata::test_fixture(), &CancellationSignal::never())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            HedgeRelationshipError::Regression(vec!["R-squared below 0.8".to_string()])
        );
        assert!(!gateway.calls().contains(&"generate_inception_package"));
    }

    #[tokio::test]
    async fn analytics_outage_is_only_a_warning() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        gateway.set_analytics(Err(GatewayError::Transport("timed out".into())));

        let result = handler(gateway.clone(), Arc::new(MockCache::new()))
            .handle(command(), CommandMetadata::test_fixture(), &CancellationSignal::never())
            .await
            .unwrap();

        assert_eq!(result.warnings, vec![ANALYTICS_UNAVAILABLE_WARNING.to_string()]);
        assert!(gateway.calls().contains(&"generate_inception_package"));
    }

    #[tokio::test]
    async fn validation_failure_makes_no_remote_writes() {
        let mut rel = designatable();
        rel.hedged_items.clear();
        let gateway = Arc::new(MockGateway::with(rel));

        let err = handler(gateway.clone(), Arc::new(MockCache::new()))
            .handle(command(), CommandMetadata::test_fixture(), &CancellationSignal::never())
            .await
            .unwrap_err();

        assert!(matches!(err, HedgeRelationshipError::Validation(ref m)
            if m.contains(&"At least one hedged item is required".to_string())));
        assert_eq!(gateway.calls(), vec!["get"]);
    }

    #[tokio::test]
    async fn already_designated_is_an_invalid_transition() {
        let gateway = Arc::new(MockGateway::with(designated()));

        let err = handler(gateway.clone(), Arc::new(MockCache::new()))
            .handle(command(), CommandMetadata::test_fixture(), &CancellationSignal::never())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            HedgeRelationshipError::InvalidTransition {
                from: HedgeState::Designated,
                to: HedgeState::Designated,
            }
        );
    }

    #[tokio::test]
    async fn package_failure_leaves_regression_in_place() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        gateway.fail("generate_inception_package", GatewayError::api(500, "render error"));

        let cache = Arc::new(MockCache::new());

        let err = handler(gateway.clone(), cache.clone())
            .handle(command(), CommandMetadata::test_fixture(), &CancellationSignal::never())
            .await
            .unwrap_err();

        assert!(matches!(err, HedgeRelationshipError::RemoteApi { status: 500, .. }));
        let stored = gateway.stored(designatable().id).unwrap();
        assert_eq!(stored.hedge_state, HedgeState::Draft);
        assert_eq!(stored.hedge_regression_batches.len(), 1);
        assert_eq!(cache.invalidated(), vec![hedge_relationship_key(designatable().id)]);
    }

    #[tokio::test]
    async fn package_is_generated_from_normalized_entity() {
        let mut rel = designatable();
        rel.hedge_exposure = Some("Stale".to_string());
        rel.portfolio_layer_method = true;
        let gateway = Arc::new(MockGateway::with(rel));

        handler(gateway.clone(), Arc::new(MockCache::new()))
            .handle(command(), CommandMetadata::test_fixture(), &CancellationSignal::never())
            .await
            .unwrap();

        let sent = gateway.last_sent().unwrap();
        assert_eq!(sent.hedge_exposure, None);
        assert!(!sent.portfolio_layer_method);
        assert_eq!(sent.hedge_regression_batches.len(), 1);
    }
}
