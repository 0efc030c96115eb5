//! Hedge Accounting Gateway Port - Interface to the remote accounting API.
//!
//! The remote system owns persistence, regression computation, inception
//! package rendering and the server side of every lifecycle transition.
//! This port exposes exactly the calls the lifecycle engine needs.
//!
//! # Design
//!
//! - Every call is network-fallible and surfaces status code plus raw body
//! - Every call takes a [`CancellationSignal`]; a cancelled call returns
//!   [`GatewayError::Cancelled`] without waiting for the remote side
//! - No call is retried by implementations

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::foundation::HedgeRelationshipId;
use crate::domain::hedging::{HedgeRelationship, HedgeResultType};

/// Port for the remote hedge accounting API.
#[async_trait]
pub trait HedgeAccountingGateway: Send + Sync {
    /// Load a relationship by id.
    async fn get(
        &self,
        id: HedgeRelationshipId,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError>;

    /// Create a new relationship; returns it with its assigned id.
    async fn create(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError>;

    /// Replace an existing relationship.
    async fn update(
        &self,
        id: HedgeRelationshipId,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError>;

    /// Run effectiveness testing. The returned entity carries the newly
    /// appended regression batch.
    async fn regress(
        &self,
        result_type: HedgeResultType,
        payload: &RegressionPayload,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError>;

    async fn dedesignate(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError>;

    async fn redesignate(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError>;

    async fn redraft(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError>;

    /// Render the inception documentation. With `preview` set the remote
    /// side does not persist the designation.
    async fn generate_inception_package(
        &self,
        preview: bool,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<InceptionPackage, GatewayError>;

    /// Whether the analytics service behind regression is reachable.
    async fn is_analytics_available(&self, cancel: &CancellationSignal)
        -> Result<bool, GatewayError>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Non-success status with the raw response body.
    #[error("remote API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("hedge relationship {0} not found")]
    NotFound(HedgeRelationshipId),

    /// Connection, TLS or timeout failure before a status was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response arrived but could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("request cancelled")]
    Cancelled,
}

impl GatewayError {
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        GatewayError::Api {
            status,
            body: body.into(),
        }
    }
}

/// Minimal body sent to the regression endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegressionPayload {
    #[serde(rename = "HedgeRelationshipID")]
    pub hedge_relationship_id: HedgeRelationshipId,
    pub notional: Decimal,
    pub description: Option<String>,
}

impl RegressionPayload {
    pub fn from_relationship(relationship: &HedgeRelationship) -> Self {
        Self {
            hedge_relationship_id: relationship.id,
            notional: relationship.notional,
            description: relationship.description.clone(),
        }
    }
}

/// Opaque inception documentation produced by the remote side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InceptionPackage {
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl InceptionPackage {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Cooperative cancellation threaded through every remote call.
///
/// Wraps the receiving half of a `watch` channel; sending `true` on the
/// paired sender cancels every clone.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal {
    receiver: Option<watch::Receiver<bool>>,
}

impl CancellationSignal {
    pub fn new(receiver: watch::Receiver<bool>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// A signal that is never cancelled.
    pub fn never() -> Self {
        Self { receiver: None }
    }

    /// Creates a sender together with a signal bound to it.
    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self::new(rx))
    }

    pub fn is_cancelled(&self) -> bool {
        self.receiver
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }

    /// Resolves once cancellation is requested. Pends forever for
    /// [`CancellationSignal::never`] or when the sender is dropped uncancelled.
    pub async fn cancelled(&self) {
        let Some(receiver) = &self.receiver else {
            return std::future::pending().await;
        };
        let mut receiver = receiver.clone();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            if receiver.changed().await.is_err() {
                return std::future::pending().await;
            }
        }
    }

    /// Returns `Err(GatewayError::Cancelled)` when cancellation was requested.
    pub fn check(&self) -> Result<(), GatewayError> {
        if self.is_cancelled() {
            Err(GatewayError::Cancelled)
        } else {
            Ok(())
        }
    }
}
