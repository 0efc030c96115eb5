//! HTTP adapters - REST API implementations.

pub mod hedge_relationship;

use axum::{routing::get, Router};

pub use hedge_relationship::{hedge_relationship_routes, HedgeRelationshipAppState};

/// Full API router: `/health` plus the nested hedge relationship routes.
pub fn api_router(state: HedgeRelationshipAppState) -> Router {
    Router::new()
        .route("/health", get(hedge_relationship::health))
        .nest("/api/hedge-relationships", hedge_relationship_routes(state))
}
