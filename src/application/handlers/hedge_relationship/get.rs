//! GetHedgeRelationshipHandler - Read-through query over the reference cache.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{CommandMetadata, HedgeRelationshipId};
use crate::domain::hedging::{HedgeRelationship, HedgeRelationshipError};
use crate::ports::{
    hedge_relationship_key, CancellationSignal, HedgeAccountingGateway, ReferenceDataCache,
};

use super::common::load;

#[derive(Debug, Clone)]
pub struct GetHedgeRelationshipQuery {
    pub hedge_relationship_id: HedgeRelationshipId,
}

#[derive(Debug, Clone)]
pub struct GetHedgeRelationshipResult {
    pub relationship: HedgeRelationship,
    pub from_cache: bool,
}

pub struct GetHedgeRelationshipHandler {
    gateway: Arc<dyn HedgeAccountingGateway>,
    cache: Arc<dyn ReferenceDataCache>,
    ttl: Duration,
}

impl GetHedgeRelationshipHandler {
    pub fn new(
        gateway: Arc<dyn HedgeAccountingGateway>,
        cache: Arc<dyn ReferenceDataCache>,
        ttl: Duration,
    ) -> Self {
        Self {
            gateway,
            cache,
            ttl,
        }
    }

    pub async fn handle(
        &self,
        query: GetHedgeRelationshipQuery,
        _metadata: CommandMetadata,
        cancel: &CancellationSignal,
    ) -> Result<GetHedgeRelationshipResult, HedgeRelationshipError> {
        let id = query.hedge_relationship_id;
        let key = hedge_relationship_key(id);

        match self.cache.get(&key).await {
            Ok(Some(value)) => match serde_json::from_value::<HedgeRelationship>(value) {
                Ok(relationship) => {
                    tracing::debug!(key = %key, "Serving hedge relationship from cache");
                    return Ok(GetHedgeRelationshipResult {
                        relationship,
                        from_cache: true,
                    });
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding unreadable cache entry");
                }
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(key = %key, error = %e, "Cache read failed"),
        }

        let relationship = load(self.gateway.as_ref(), id, cancel).await?;

        match serde_json::to_value(&relationship) {
            Ok(value) => {
                if let Err(e) = self.cache.put(&key, value, self.ttl).await {
                    tracing::warn!(key = %key, error = %e, "Cache write failed");
                }
            }
            Err(e) => tracing::warn!(key = %key, error = %e, "Could not serialize for cache"),
        }

        Ok(GetHedgeRelationshipResult {
            relationship,
            from_cache: false,
        })
    }
}
