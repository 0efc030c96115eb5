//! Mock ports shared by the lifecycle handler tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::HedgeRelationshipId;
use crate::domain::hedging::{
    HedgeRegressionBatch, HedgeRelationship, HedgeResultType, HedgeState,
};
use crate::ports::{
    CacheError, CancellationSignal, Clock, GatewayError, HedgeAccountingGateway,
    InceptionPackage, ReferenceDataCache, RegressionPayload,
};

pub(crate) use crate::domain::hedging::rules::fixtures::{date, designatable, designated, today};

// ════════════════════════════════════════════════════════════════════════════
// Mock Gateway
// ════════════════════════════════════════════════════════════════════════════

struct GatewayState {
    relationships: HashMap<HedgeRelationshipId, HedgeRelationship>,
    calls: Vec<&'static str>,
    failures: HashMap<&'static str, GatewayError>,
    regression_batch: Option<HedgeRegressionBatch>,
    analytics: Result<bool, GatewayError>,
    last_sent: Option<HedgeRelationship>,
    previews: Vec<bool>,
    next_id: i64,
}

pub(crate) struct MockGateway {
    state: Mutex<GatewayState>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GatewayState {
                relationships: HashMap::new(),
                calls: Vec::new(),
                failures: HashMap::new(),
                regression_batch: None,
                analytics: Ok(true),
                last_sent: None,
                previews: Vec::new(),
                next_id: 500,
            }),
        }
    }

    pub fn with(relationship: HedgeRelationship) -> Self {
        let gateway = Self::new();
        gateway
            .state
            .lock()
            .unwrap()
            .relationships
            .insert(relationship.id, relationship);
        gateway
    }

    /// Makes every later call to `operation` fail with `error`.
    pub fn fail(&self, operation: &'static str, error: GatewayError) {
        self.state.lock().unwrap().failures.insert(operation, error);
    }

    pub fn set_regression_batch(&self, batch: HedgeRegressionBatch) {
        self.state.lock().unwrap().regression_batch = Some(batch);
    }

    pub fn set_analytics(&self, outcome: Result<bool, GatewayError>) {
        self.state.lock().unwrap().analytics = outcome;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn stored(&self, id: HedgeRelationshipId) -> Option<HedgeRelationship> {
        self.state.lock().unwrap().relationships.get(&id).cloned()
    }

    /// The entity passed to the most recent write or package call.
    pub fn last_sent(&self) -> Option<HedgeRelationship> {
        self.state.lock().unwrap().last_sent.clone()
    }

    pub fn previews(&self) -> Vec<bool> {
        self.state.lock().unwrap().previews.clone()
    }

    fn begin(&self, operation: &'static str) -> Result<(), GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation);
        match state.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn write(
        &self,
        relationship: &HedgeRelationship,
        apply: impl FnOnce(&mut HedgeRelationship),
    ) -> Result<HedgeRelationship, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.last_sent = Some(relationship.clone());
        let mut stored = relationship.clone();
        apply(&mut stored);
        state.relationships.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl HedgeAccountingGateway for MockGateway {
    async fn get(
        &self,
        id: HedgeRelationshipId,
        _cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.begin("get")?;
        self.stored(id).ok_or(GatewayError::NotFound(id))
    }

    async fn create(
        &self,
        relationship: &HedgeRelationship,
        _cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.begin("create")?;
        let id = {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            HedgeRelationshipId::new(state.next_id)
        };
        self.write(relationship, |r| r.id = id)
    }

    async fn update(
        &self,
        id: HedgeRelationshipId,
        relationship: &HedgeRelationship,
        _cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.begin("update")?;
        self.write(relationship, |r| r.id = id)
    }

    async fn regress(
        &self,
        result_type: HedgeResultType,
        payload: &RegressionPayload,
        _cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.begin("regress")?;
        let mut state = self.state.lock().unwrap();
        let batch = state.regression_batch.clone().unwrap_or(HedgeRegressionBatch {
            value_date: today(),
            slope: -0.98,
            r_squared: 0.97,
            hedge_result_type: result_type,
            error_message: None,
        });
        let relationship = state
            .relationships
            .get_mut(&payload.hedge_relationship_id)
            .ok_or(GatewayError::NotFound(payload.hedge_relationship_id))?;
        relationship.hedge_regression_batches.push(batch);
        Ok(relationship.clone())
    }

    async fn dedesignate(
        &self,
        relationship: &HedgeRelationship,
        _cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.begin("dedesignate")?;
        self.write(relationship, |r| r.hedge_state = HedgeState::Dedesignated)
    }

    async fn redesignate(
        &self,
        relationship: &HedgeRelationship,
        _cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.begin("redesignate")?;
        self.write(relationship, |r| r.hedge_state = HedgeState::Designated)
    }

    async fn redraft(
        &self,
        relationship: &HedgeRelationship,
        _cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.begin("redraft")?;
        self.write(relationship, |r| r.hedge_state = HedgeState::Draft)
    }

    async fn generate_inception_package(
        &self,
        preview: bool,
        relationship: &HedgeRelationship,
        _cancel: &CancellationSignal,
    ) -> Result<InceptionPackage, GatewayError> {
        self.begin("generate_inception_package")?;
        let mut state = self.state.lock().unwrap();
        state.previews.push(preview);
        state.last_sent = Some(relationship.clone());
        if !preview {
            if let Some(stored) = state.relationships.get_mut(&relationship.id) {
                stored.hedge_state = HedgeState::Designated;
            }
        }
        Ok(InceptionPackage {
            file_name: format!("inception-{}.docx", relationship.id),
            content_type: "application/octet-stream".to_string(),
            content: b"PK\x03\x04".to_vec(),
        })
    }

    async fn is_analytics_available(
        &self,
        _cancel: &CancellationSignal,
    ) -> Result<bool, GatewayError> {
        self.begin("is_analytics_available")?;
        self.state.lock().unwrap().analytics.clone()
    }
}

pub(crate) fn failed_batch(message: &str) -> HedgeRegressionBatch {
    HedgeRegressionBatch {
        value_date: date(2024, 12, 31),
        slope: 0.0,
        r_squared: 0.0,
        hedge_result_type: HedgeResultType::Inception,
        error_message: Some(message.to_string()),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mock Cache and Clock
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub(crate) struct MockCache {
    entries: Mutex<HashMap<String, serde_json::Value>>,
    invalidated: Mutex<Vec<String>>,
    puts: Mutex<Vec<(String, Duration)>>,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &str, value: serde_json::Value) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    pub fn invalidated(&self) -> Vec<String> {
        self.invalidated.lock().unwrap().clone()
    }

    pub fn puts(&self) -> Vec<(String, Duration)> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReferenceDataCache for MockCache {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CacheError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.puts.lock().unwrap().push((key.to_string(), ttl));
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.invalidated.lock().unwrap().push(key.to_string());
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

pub(crate) struct TestClock(pub NaiveDate);

impl Clock for TestClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub(crate) fn test_clock() -> TestClock {
    TestClock(today())
}
