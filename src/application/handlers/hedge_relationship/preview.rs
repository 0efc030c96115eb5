//! PreviewInceptionPackageHandler - Render the package without designating.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, HedgeRelationshipId};
use crate::domain::hedging::HedgeRelationshipError;
use crate::ports::{CancellationSignal, HedgeAccountingGateway, InceptionPackage};

use super::common::load;
use super::InceptionPackageGenerator;

#[derive(Debug, Clone)]
pub struct PreviewInceptionPackageQuery {
    pub hedge_relationship_id: HedgeRelationshipId,
}

pub struct PreviewInceptionPackageHandler {
    gateway: Arc<dyn HedgeAccountingGateway>,
    packages: InceptionPackageGenerator,
}

impl PreviewInceptionPackageHandler {
    pub fn new(gateway: Arc<dyn HedgeAccountingGateway>) -> Self {
        Self {
            packages: InceptionPackageGenerator::new(gateway.clone()),
            gateway,
        }
    }

    pub async fn handle(
        &self,
        query: PreviewInceptionPackageQuery,
        _metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> Result<InceptionPackage, HedgeRelationshipError> {
        let relationship = load(self.gateway.as_ref(), query.hedge_relationship_id, cancel).await?;
        self.packages.generate(&relationship, true, cancel).await
    }
}
