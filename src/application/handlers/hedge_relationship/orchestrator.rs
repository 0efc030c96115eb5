//! LifecycleOrchestrator - Facade over the hedge relationship handlers.
//!
//! Every method returns a [`CommandResponse`]; no error escapes. Failures
//! are logged here with their error code before being translated.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{CommandMetadata, HedgeRelationshipId};
use crate::domain::hedging::{
    DedesignationTerms, HedgeRelationship, HedgeRelationshipError, HedgeResultType,
    RedesignationTerms,
};
use crate::ports::{
    CancellationSignal, Clock, HedgeAccountingGateway, InceptionPackage, ReferenceDataCache,
};

use super::{
    CommandResponse, DeDesignateCommand, DeDesignateHandler, DesignateCommand, DesignateHandler,
    DesignateResult, GetHedgeRelationshipHandler, GetHedgeRelationshipQuery,
    PreviewInceptionPackageHandler, PreviewInceptionPackageQuery, ReDesignateCommand,
    ReDesignateHandler, RedraftCommand, RedraftHandler, RunRegressionCommand,
    RunRegressionHandler, SaveHedgeRelationshipCommand, SaveHedgeRelationshipHandler,
};

pub struct LifecycleOrchestrator {
    get: GetHedgeRelationshipHandler,
    save: SaveHedgeRelationshipHandler,
    designate: DesignateHandler,
    dedesignate: DeDesignateHandler,
    redesignate: ReDesignateHandler,
    redraft: RedraftHandler,
    regression: RunRegressionHandler,
    preview: PreviewInceptionPackageHandler,
}

impl LifecycleOrchestrator {
    pub fn new(
        gateway: Arc<dyn HedgeAccountingGateway>,
        cache: Arc<dyn ReferenceDataCache>,
        clock: Arc<dyn Clock>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            get: GetHedgeRelationshipHandler::new(gateway.clone(), cache.clone(), cache_ttl),
            save: SaveHedgeRelationshipHandler::new(gateway.clone(), cache.clone(), clock.clone()),
            designate: DesignateHandler::new(gateway.clone(), cache.clone(), clock.clone()),
            dedesignate: DeDesignateHandler::new(gateway.clone(), cache.clone(), clock.clone()),
            redesignate: ReDesignateHandler::new(gateway.clone(), cache.clone(), clock),
            redraft: RedraftHandler::new(gateway.clone(), cache.clone()),
            regression: RunRegressionHandler::new(gateway.clone(), cache),
            preview: PreviewInceptionPackageHandler::new(gateway),
        }
    }

    pub async fn get(
        &self,
        id: HedgeRelationshipId,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> CommandResponse<HedgeRelationship> {
        let query = GetHedgeRelationshipQuery {
            hedge_relationship_id: id,
        };
        match self.get.handle(query, metadata, cancel).await {
            Ok(result) => CommandResponse::success(result.relationship),
            Err(e) => failed("get", id, e),
        }
    }

    pub async fn save(
        &self,
        relationship: HedgeRelationship,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> CommandResponse<HedgeRelationship> {
        let id = relationship.id;
        let cmd = SaveHedgeRelationshipCommand { relationship };
        match self.save.handle(cmd, metadata, cancel).await {
            Ok(result) => {
                CommandResponse::success(result.relationship).with_confirmation(result.confirmation)
            }
            Err(e) => failed("save", id, e),
        }
    }

    pub async fn designate(
        &self,
        id: HedgeRelationshipId,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> CommandResponse<DesignateResult> {
        let cmd = DesignateCommand {
            hedge_relationship_id: id,
        };
        match self.designate.handle(cmd, metadata, cancel).await {
            Ok(result) => {
                let warnings = result.warnings.clone();
                CommandResponse::success(result).with_warnings(warnings)
            }
            Err(e) => failed("designate", id, e),
        }
    }

    pub async fn dedesignate(
        &self,
        id: HedgeRelationshipId,
        terms: DedesignationTerms,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> CommandResponse<HedgeRelationship> {
        let cmd = DeDesignateCommand {
            hedge_relationship_id: id,
            terms,
        };
        match self.dedesignate.handle(cmd, metadata, cancel).await {
            Ok(result) => {
                CommandResponse::success(result.relationship).with_confirmation(result.confirmation)
            }
            Err(e) => failed("dedesignate", id, e),
        }
    }

    pub async fn redesignate(
        &self,
        id: HedgeRelationshipId,
        terms: RedesignationTerms,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> CommandResponse<HedgeRelationship> {
        let cmd = ReDesignateCommand {
            hedge_relationship_id: id,
            terms,
        };
        match self.redesignate.handle(cmd, metadata, cancel).await {
            Ok(result) => CommandResponse::success(result.relationship),
            Err(e) => failed("redesignate", id, e),
        }
    }

    pub async fn redraft(
        &self,
        id: HedgeRelationshipId,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> CommandResponse<HedgeRelationship> {
        let cmd = RedraftCommand {
            hedge_relationship_id: id,
        };
        match self.redraft.handle(cmd, metadata, cancel).await {
            Ok(result) => CommandResponse::success(result.relationship),
            Err(e) => failed("redraft", id, e),
        }
    }

    pub async fn run_regression(
        &self,
        id: HedgeRelationshipId,
        relationship: Option<HedgeRelationship>,
        result_type: HedgeResultType,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> CommandResponse<HedgeRelationship> {
        let cmd = RunRegressionCommand {
            hedge_relationship_id: id,
            relationship,
            result_type,
        };
        match self.regression.handle(cmd, metadata, cancel).await {
            Ok(result) => CommandResponse::success(result.relationship),
            Err(e) => failed("run_regression", id, e),
        }
    }

    pub async fn preview_inception_package(
        &self,
        id: HedgeRelationshipId,
        metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> CommandResponse<InceptionPackage> {
        let query = PreviewInceptionPackageQuery {
            hedge_relationship_id: id,
        };
        match self.preview.handle(query, metadata, cancel).await {
            Ok(package) => CommandResponse::success(package),
            Err(e) => failed("preview_inception_package", id, e),
        }
    }
}

fn failed<T>(
    command: &str,
    id: HedgeRelationshipId,
    error: HedgeRelationshipError,
) -> CommandResponse<T> {
    tracing::warn!(
        hedge_relationship_id = %id,
        command,
        code = %error.code(),
        error = %error,
        "Lifecycle command failed"
    );
    CommandResponse::failure(&error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::hedge_relationship::test_support::{
        designatable, failed_batch, test_clock, MockCache, MockGateway,
    };
    use crate::domain::foundation::ErrorCode;

    fn orchestrator(gateway: Arc<MockGateway>) -> LifecycleOrchestrator {
        LifecycleOrchestrator::new(
            gateway,
            Arc::new(MockCache::new()),
            Arc::new(test_clock()),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn failed_designation_reports_error_without_package() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        gateway.set_regression_batch(failed_batch("Slope outside 80-125% band"));

        let response = orchestrator(gateway.clone())
            .designate(
                designatable().id,
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await;

        assert!(response.has_error);
        assert!(response.data.is_none());
        assert_eq!(
            response.error_messages,
            vec!["Slope outside 80-125% band".to_string()]
        );
        assert_eq!(response.error_code, Some(ErrorCode::RegressionFailed));
        assert!(!gateway.calls().contains(&"generate_inception_package"));
    }

    #[tokio::test]
    async fn successful_designation_returns_package_and_entity() {
        let gateway = Arc::new(MockGateway::with(designatable()));

        let response = orchestrator(gateway)
            .designate(
                designatable().id,
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await;

        assert!(!response.has_error);
        let data = response.data.unwrap();
        assert!(!data.package.is_empty());
        assert_eq!(data.relationship.id, designatable().id);
    }

    #[tokio::test]
    async fn cancelled_command_reports_cancellation() {
        let gateway = Arc::new(MockGateway::with(designatable()));
        let (tx, cancel) = CancellationSignal::channel();
        tx.send(true).unwrap();

        let response = orchestrator(gateway.clone())
            .redraft(designatable().id, CommandMetadata::test_fixture(), &cancel)
            .await;

        assert!(response.has_error);
        assert_eq!(response.error_code, Some(ErrorCode::Cancelled));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_relationship_maps_to_not_found() {
        let response = orchestrator(Arc::new(MockGateway::new()))
            .get(
                HedgeRelationshipId::new(77),
                CommandMetadata::test_fixture(),
                &CancellationSignal::never(),
            )
            .await;

        assert_eq!(response.error_code, Some(ErrorCode::HedgeRelationshipNotFound));
    }
}
