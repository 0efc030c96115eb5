//! Hedge Accounting API client - reqwest implementation of HedgeAccountingGateway.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HedgeApiConfig::new("https://hedge.example.com")
//!     .with_api_token(token)
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = HedgeApiClient::new(config)?;
//! ```
//!
//! Every request, including its body read, races the caller's
//! [`CancellationSignal`]; a cancelled request is dropped and reported as
//! [`GatewayError::Cancelled`]. Nothing is retried.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;

use crate::domain::foundation::HedgeRelationshipId;
use crate::domain::hedging::{HedgeRelationship, HedgeResultType};
use crate::ports::{
    CancellationSignal, GatewayError, HedgeAccountingGateway, InceptionPackage, RegressionPayload,
};

use super::wire::WireHedgeRelationship;

const RESOURCE: &str = "v1/HedgeRelationship";
const DEFAULT_PACKAGE_CONTENT_TYPE: &str = "application/octet-stream";

/// Configuration for the Hedge Accounting API client.
#[derive(Debug, Clone)]
pub struct HedgeApiConfig {
    /// Base URL, without the `/v1` segment.
    pub base_url: String,
    /// Optional bearer token.
    api_token: Option<Secret<String>>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl HedgeApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_token(mut self, token: Secret<String>) -> Self {
        self.api_token = Some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// reqwest-backed gateway to the remote Hedge Accounting API.
pub struct HedgeApiClient {
    config: HedgeApiConfig,
    client: Client,
}

impl HedgeApiClient {
    pub fn new(config: HedgeApiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}{}",
            self.config.base_url.trim_end_matches('/'),
            RESOURCE,
            path
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Sends the request unless the signal fires first.
    async fn send(
        &self,
        request: RequestBuilder,
        cancel: &CancellationSignal,
    ) -> Result<Response, GatewayError> {
        cancel.check()?;
        let request = self.authorize(request);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(GatewayError::Cancelled),
            result = request.send() => result.map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Transport(format!("Request timed out: {}", e))
                } else {
                    GatewayError::Transport(e.to_string())
                }
            }),
        }
    }

    /// Maps non-success statuses to `GatewayError::Api` with the raw body.
    async fn handle_response_status(
        &self,
        response: Response,
        cancel: &CancellationSignal,
    ) -> Result<Response, GatewayError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = until_cancelled(cancel, async move {
            Ok(response.text().await.unwrap_or_default())
        })
        .await?;
        Err(GatewayError::api(status.as_u16(), body))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: Response,
        cancel: &CancellationSignal,
    ) -> Result<T, GatewayError> {
        let response = self.handle_response_status(response, cancel).await?;
        until_cancelled(cancel, async move {
            response
                .json::<T>()
                .await
                .map_err(|e| GatewayError::Decode(format!("Failed to parse response: {}", e)))
        })
        .await
    }

    async fn read_relationship(
        &self,
        response: Response,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        let wire: WireHedgeRelationship = self.read_json(response, cancel).await?;
        wire.to_domain()
    }

    async fn post_relationship(
        &self,
        path: &str,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        let body = WireHedgeRelationship::from_domain(relationship);
        let response = self
            .send(self.client.post(self.url(path)).json(&body), cancel)
            .await?;
        self.read_relationship(response, cancel).await
    }
}

#[async_trait]
impl HedgeAccountingGateway for HedgeApiClient {
    async fn get(
        &self,
        id: HedgeRelationshipId,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        let response = self
            .send(self.client.get(self.url(&format!("/{}", id))), cancel)
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(id));
        }
        self.read_relationship(response, cancel).await
    }

    async fn create(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.post_relationship("", relationship, cancel).await
    }

    async fn update(
        &self,
        id: HedgeRelationshipId,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        let body = WireHedgeRelationship::from_domain(relationship);
        let response = self
            .send(
                self.client.put(self.url(&format!("/{}", id))).json(&body),
                cancel,
            )
            .await?;
        self.read_relationship(response, cancel).await
    }

    async fn regress(
        &self,
        result_type: HedgeResultType,
        payload: &RegressionPayload,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        let request = self
            .client
            .post(self.url("/Regress"))
            .query(&[("hedgeResultType", result_type.wire_name())])
            .json(payload);
        let response = self.send(request, cancel).await?;
        self.read_relationship(response, cancel).await
    }

    async fn dedesignate(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.post_relationship("/Dedesignate", relationship, cancel)
            .await
    }

    async fn redesignate(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.post_relationship("/Redesignate", relationship, cancel)
            .await
    }

    async fn redraft(
        &self,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<HedgeRelationship, GatewayError> {
        self.post_relationship("/Redraft", relationship, cancel).await
    }

    async fn generate_inception_package(
        &self,
        preview: bool,
        relationship: &HedgeRelationship,
        cancel: &CancellationSignal,
    ) -> Result<InceptionPackage, GatewayError> {
        let body = WireHedgeRelationship::from_domain(relationship);
        let request = self
            .client
            .post(self.url("/GenerateInceptionPackage"))
            .query(&[("preview", preview)])
            .json(&body);
        let response = self.send(request, cancel).await?;
        let response = self.handle_response_status(response, cancel).await?;

        let headers = response.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_PACKAGE_CONTENT_TYPE)
            .to_string();
        let file_name = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_attachment_file_name)
            .unwrap_or_else(|| default_package_file_name(relationship.id));

        let content = until_cancelled(cancel, async move {
            response
                .bytes()
                .await
                .map_err(|e| GatewayError::Decode(format!("Failed to read package: {}", e)))
        })
        .await?;

        Ok(InceptionPackage {
            file_name,
            content_type,
            content: content.to_vec(),
        })
    }

    async fn is_analytics_available(
        &self,
        cancel: &CancellationSignal,
    ) -> Result<bool, GatewayError> {
        let response = self
            .send(self.client.get(self.url("/IsAnalyticsAvailable")), cancel)
            .await?;
        self.read_json(response, cancel).await
    }
}

/// Drops `read` as soon as the signal fires.
async fn until_cancelled<T>(
    cancel: &CancellationSignal,
    read: impl Future<Output = Result<T, GatewayError>>,
) -> Result<T, GatewayError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(GatewayError::Cancelled),
        result = read => result,
    }
}

/// Extracts `filename` from a `Content-Disposition` header value.
fn parse_attachment_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

fn default_package_file_name(id: HedgeRelationshipId) -> String {
    format!("InceptionPackage_{}.docx", id)
}
