//! HTTP handlers for hedge relationship endpoints.
//!
//! Every endpoint answers with the `CommandResponse` envelope, except a
//! successful package preview which streams the document itself.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::handlers::hedge_relationship::{CommandResponse, LifecycleOrchestrator};
use crate::domain::foundation::{CommandMetadata, ErrorCode, HedgeRelationshipId};
use crate::domain::hedging::{HedgeRelationship, HedgeRelationshipError};
use crate::ports::CancellationSignal;

use super::dto::{
    DedesignateRequest, DesignateResponse, HealthResponse, RedesignateRequest,
    RunRegressionRequest,
};

const CORRELATION_HEADER: &str = "x-correlation-id";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct HedgeRelationshipAppState {
    orchestrator: Arc<LifecycleOrchestrator>,
}

impl HedgeRelationshipAppState {
    pub fn new(orchestrator: Arc<LifecycleOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/hedge-relationships/:id - Load a relationship
pub async fn get_hedge_relationship(
    State(state): State<HedgeRelationshipAppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let response = state
        .orchestrator
        .get(id, request_metadata(&headers), &request_cancellation())
        .await;
    into_http(response)
}

/// POST /api/hedge-relationships - Create (or update when the body has an id)
pub async fn create_hedge_relationship(
    State(state): State<HedgeRelationshipAppState>,
    headers: HeaderMap,
    Json(relationship): Json<HedgeRelationship>,
) -> Response {
    let response = state
        .orchestrator
        .save(relationship, request_metadata(&headers), &request_cancellation())
        .await;
    into_http(response)
}

/// PUT /api/hedge-relationships/:id - Update a relationship
pub async fn update_hedge_relationship(
    State(state): State<HedgeRelationshipAppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(mut relationship): Json<HedgeRelationship>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if !id.is_persisted() {
        return bad_request("Hedge relationship ID must be positive");
    }
    relationship.id = id;
    let response = state
        .orchestrator
        .save(relationship, request_metadata(&headers), &request_cancellation())
        .await;
    into_http(response)
}

/// POST /api/hedge-relationships/:id/designate - Designate a draft
pub async fn designate(
    State(state): State<HedgeRelationshipAppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let response = state
        .orchestrator
        .designate(id, request_metadata(&headers), &request_cancellation())
        .await
        .map(DesignateResponse::from);
    into_http(response)
}

/// POST /api/hedge-relationships/:id/dedesignate - End hedge accounting
pub async fn dedesignate(
    State(state): State<HedgeRelationshipAppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<DedesignateRequest>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let response = state
        .orchestrator
        .dedesignate(
            id,
            req.into_terms(),
            request_metadata(&headers),
            &request_cancellation(),
        )
        .await;
    into_http(response)
}

/// POST /api/hedge-relationships/:id/redesignate - Start a new cycle
pub async fn redesignate(
    State(state): State<HedgeRelationshipAppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<RedesignateRequest>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let response = state
        .orchestrator
        .redesignate(
            id,
            req.into_terms(),
            request_metadata(&headers),
            &request_cancellation(),
        )
        .await;
    into_http(response)
}

/// POST /api/hedge-relationships/:id/redraft - Revert to draft
pub async fn redraft(
    State(state): State<HedgeRelationshipAppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let response = state
        .orchestrator
        .redraft(id, request_metadata(&headers), &request_cancellation())
        .await;
    into_http(response)
}

/// POST /api/hedge-relationships/:id/regression - Run effectiveness testing
pub async fn run_regression(
    State(state): State<HedgeRelationshipAppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<RunRegressionRequest>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let response = state
        .orchestrator
        .run_regression(
            id,
            req.relationship,
            req.hedge_result_type,
            request_metadata(&headers),
            &request_cancellation(),
        )
        .await;
    into_http(response)
}

/// GET /api/hedge-relationships/:id/inception-package/preview - Render without designating
pub async fn preview_inception_package(
    State(state): State<HedgeRelationshipAppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mut response = state
        .orchestrator
        .preview_inception_package(id, request_metadata(&headers), &request_cancellation())
        .await;

    match response.data.take() {
        Some(package) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, package.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!(
                        "inline; filename=\"{}\"",
                        header_safe_file_name(&package.file_name)
                    ),
                ),
            ],
            package.content,
        )
            .into_response(),
        None => into_http(response.map(|_| ())),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn request_metadata(headers: &HeaderMap) -> CommandMetadata {
    let metadata = CommandMetadata::new().with_source("api");
    match headers
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        Some(id) => metadata.with_correlation_id(id),
        None => metadata.ensure_correlation_id(),
    }
}

/// Dropping the request future aborts in-flight gateway calls, so handlers
/// do not need a live signal of their own.
fn request_cancellation() -> CancellationSignal {
    CancellationSignal::never()
}

/// Drops characters that would break out of a quoted header parameter.
fn header_safe_file_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '"' | '\\') && !c.is_control())
        .collect();
    match cleaned.trim() {
        "" => "InceptionPackage".to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn parse_id(raw: &str) -> Result<HedgeRelationshipId, Response> {
    raw.parse::<HedgeRelationshipId>()
        .map_err(|_| bad_request("Invalid hedge relationship ID"))
}

fn bad_request(message: &str) -> Response {
    let error = HedgeRelationshipError::validation(vec![message.to_string()]);
    let body: CommandResponse<()> = CommandResponse::failure(&error);
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn into_http<T: Serialize>(response: CommandResponse<T>) -> Response {
    let status = status_for(response.error_code);
    (status, Json(response)).into_response()
}

pub(super) fn status_for(code: Option<ErrorCode>) -> StatusCode {
    match code {
        None => StatusCode::OK,
        Some(ErrorCode::ValidationFailed)
        | Some(ErrorCode::InvalidStateTransition)
        | Some(ErrorCode::RegressionFailed) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(ErrorCode::HedgeRelationshipNotFound) => StatusCode::NOT_FOUND,
        Some(ErrorCode::RemoteApiError) => StatusCode::BAD_GATEWAY,
        Some(ErrorCode::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
        Some(ErrorCode::CacheError) | Some(ErrorCode::InternalError) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
