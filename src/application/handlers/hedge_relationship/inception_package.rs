//! InceptionPackageGenerator - Produces hedge inception documentation.

use std::sync::Arc;

use crate::domain::hedging::{HedgeRelationship, HedgeRelationshipError};
use crate::ports::{CancellationSignal, HedgeAccountingGateway, InceptionPackage};

use super::common::{ensure_not_cancelled, gateway_failure};

pub struct InceptionPackageGenerator {
    gateway: Arc<dyn HedgeAccountingGateway>,
}

impl InceptionPackageGenerator {
    pub fn new(gateway: Arc<dyn HedgeAccountingGateway>) -> Self {
        Self { gateway }
    }

    /// Generates the package. In preview mode the remote side computes the
    /// same document without persisting the designation.
    pub async fn generate(
        &self,
        relationship: &HedgeRelationship,
        preview: bool,
        cancel: &CancellationSignal,
    ) -> Result<InceptionPackage, HedgeRelationshipError> {
        ensure_not_cancelled(cancel)?;
        let package = self
            .gateway
            .generate_inception_package(preview, relationship, cancel)
            .await
            .map_err(|e| {
                gateway_failure("generate inception package for", relationship.id, e)
            })?;

        tracing::info!(
            hedge_relationship_id = %relationship.id,
            preview,
            file_name = %package.file_name,
            bytes = package.len(),
            "Generated inception package"
        );
        Ok(package)
    }
}
