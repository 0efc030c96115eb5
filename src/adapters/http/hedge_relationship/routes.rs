//! HTTP routes for hedge relationship endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_hedge_relationship, dedesignate, designate, get_hedge_relationship,
    preview_inception_package, redesignate, redraft, run_regression, update_hedge_relationship,
    HedgeRelationshipAppState,
};

/// Creates the hedge relationship router. Mount under `/api/hedge-relationships`.
pub fn hedge_relationship_routes(state: HedgeRelationshipAppState) -> Router {
    Router::new()
        .route("/", post(create_hedge_relationship))
        .route(
            "/:id",
            get(get_hedge_relationship).put(update_hedge_relationship),
        )
        .route("/:id/designate", post(designate))
        .route("/:id/dedesignate", post(dedesignate))
        .route("/:id/redesignate", post(redesignate))
        .route("/:id/redraft", post(redraft))
        .route("/:id/regression", post(run_regression))
        .route(
            "/:id/inception-package/preview",
            get(preview_inception_package),
        )
        .with_state(state)
}
