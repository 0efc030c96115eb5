//! In-memory Hedge Accounting gateway.
//!
//! Emulates the remote API closely enough to drive whole lifecycle flows
//! without a network: ids are assigned on create, transitions move the
//! stored state, regression appends a batch and non-preview package
//! generation marks the relationship designated.
//!
//! Calls are recorded in order and failures can be injected per
//! operation, which makes this adapter the backbone of the integration
//! tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::HedgeRelationshipId;
use crate::domain::hedging::{
    HedgeRegressionBatch, HedgeRelationship, HedgeResultType, HedgeState,
};
use crate::ports::{
    CancellationSignal, GatewayError, HedgeAccountingGateway, InceptionPackage, RegressionPayload,
};

/// Gateway operations, as recorded by [`InMemoryHedgeGateway::calls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    Get,
    Create,
    Update,
    Regress,
    Dedesignate,
    Redesignate,
    Redraft,
    GenerateInceptionPackage,
    IsAnalyticsAvailable,
}

/// Outcome the next regression runs will report.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionOutcome {
    pub slope: f64,
    pub r_squared: f64,
    pub error_message: Option<String>,
}

impl RegressionOutcome {
    pub fn effective() -> Self {
        Self {
            slope: -0.98,
            r_squared: 0.96,
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            slope: 0.0,
            r_squared: 0.0,
            error_message: Some(message.into()),
        }
    }
}

struct Store {
    relationships: HashMap<HedgeRelationshipId, HedgeRelationship>,
    calls: Vec<GatewayOperation>,
    injected: HashMap<GatewayOperation, VecDeque<GatewayError>>,
    regression: RegressionOutcome,
    analytics_available: bool,
    valuation_date: NaiveDate,
    next_id: i64,
}

pub struct InMemoryHedgeGateway {
    store: Mutex<Store>,
}

impl InMemoryHedgeGateway {
    /// Creates an empty gateway whose regressions are stamped with `valuation_date`.
    pub fn new(valuation_date: NaiveDate) -> Self {
        Self {
            store: Mutex::new(Store {
                relationships: HashMap::new(),
                calls: Vec::new(),
                injected: HashMap::new(),
                regression: RegressionOutcome::effective(),
                analytics_available: true,
                valuation_date,
                next_id: 0,
            }),
        }
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a relationship as-is, keeping its id.
    pub fn insert(&self, relationship: HedgeRelationship) {
        let mut store = self.store();
        store.next_id = store.next_id.max(relationship.id.value());
        store.relationships.insert(relationship.id, relationship);
    }

    pub fn relationship(&self, id: HedgeRelationshipId) -> Option<HedgeRelationship> {
        self.store().relationships.get(&id).cloned()
    }

    pub fn set_regression_outcome(&self, outcome: RegressionOutcome) {
        self.store().regression = outcome;
    }

    pub fn set_analytics_available(&self, available: bool) {
        self.store().analytics_available = available;
    }

    /// Queues `error` for the next call to `operation`.
    pub fn fail_next(&self, operation: GatewayOperation, error: GatewayError) {
        self.store()
            .injected
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    pub fn calls(&self) -> Vec<GatewayOperation> {
        self.store().calls.clone()
    }

    pub fn call_count(&self, operation: GatewayOperation) -> usize {
        self.store().calls.iter().filter(|c| **c == operation).count()
    }

    /// Records the call and pops any injected failure.
    fn begin(
        &self,
        operation: GatewayOperation,
        cancel: &CancellationSignal,
    ) -> Result<MutexGuard<'_, Store>, GatewayError> {
        cancel.check()?;
        let mut store = self.store();
        store.calls.push(operation);
        if let Some(error) = store
            .injected
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        Ok(store)
    }

    fn transition(
        &self,
        operation: GatewayOperation,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
        target: HedgeState,
    ) -> Result<HedgeRelationship, GatewayError> {
        let mut store = self.begin(operation, cancel)?;
        if !store.relationships.contains_key(&relationship.id) {
            return Err(GatewayError::NotFound(relationship.id));
        }
        let mut updated = relationship.clone();
        updated.hedge_state = target;
        store.relationships.insert(updated.id, updated.clone());
        Ok(updated)
    }
}

#[async_trait]
impl HedgeAccountingGateway for InMemoryHedgeGateway {
    async fn get(
        &self,
        id: HedgeRelationshipId,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        let store = self.begin(GatewayOperation::Get, cancel)?;
        store
            .relationships
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound(id))
    }

    async fn create(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        let mut store = self.begin(GatewayOperation::Create, cancel)?;
        store.next_id += 1;
        let mut created = relationship.clone();
        created.id = HedgeRelationshipId::new(store.next_id);
        store.relationships.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: HedgeRelationshipId,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        let mut store = self.begin(GatewayOperation::Update, cancel)?;
        if !store.relationships.contains_key(&id) {
            return Err(GatewayError::NotFound(id));
        }
        let mut updated = relationship.clone();
        updated.id = id;
        store.relationships.insert(id, updated.clone());
        Ok(updated)
    }

    async fn regress(
        &self,
        result_type: HedgeResultType,
        payload: &RegressionPayload,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        let mut store = self.begin(GatewayOperation::Regress, cancel)?;
        let batch = HedgeRegressionBatch {
            value_date: store.valuation_date,
            slope: store.regression.slope,
            r_squared: store.regression.r_squared,
            hedge_result_type: result_type,
            error_message: store.regression.error_message.clone(),
        };
        let id = payload.hedge_relationship_id;
        let relationship = store
            .relationships
            .get_mut(&id)
            .ok_or(GatewayError::NotFound(id))?;
        relationship.hedge_regression_batches.push(batch);
        Ok(relationship.clone())
    }

    async fn dedesignate(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.transition(
            GatewayOperation::Dedesignate,
            relationship,
            cancel,
            HedgeState::Dedesignated,
        )
    }

    async fn redesignate(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.transition(
            GatewayOperation::Redesignate,
            relationship,
            cancel,
            HedgeState::Designated,
        )
    }

    async fn redraft(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.transition(GatewayOperation::Redraft, relationship, cancel, HedgeState::Draft)
    }

    async fn generate_inception_package(
        &self,
        preview: bool,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<InceptionPackage, GatewayError> {
        let mut store = self.begin(GatewayOperation::GenerateInceptionPackage, cancel)?;
        let stored = store
            .relationships
            .get_mut(&relationship.id)
            .ok_or(GatewayError::NotFound(relationship.id))?;
        if !preview {
            stored.hedge_state = HedgeState::Designated;
        }

        let content = format!(
            "Inception package for hedge relationship {} ({}, {})",
            relationship.id, relationship.hedge_type, relationship.hedge_risk_type
        );
        Ok(InceptionPackage {
            file_name: format!("InceptionPackage_{}.txt", relationship.id),
            content_type: "text/plain".to_string(),
            content: content.into_bytes(),
        })
    }

    async fn is_analytics_available(
        &self,
        cancel: &CancellationSignal,
    ) -> Result<bool, GatewayError> {
        let store = self.begin(GatewayOperation::IsAnalyticsAvailable, cancel)?;
        Ok(store.analytics_available)
    }
}
