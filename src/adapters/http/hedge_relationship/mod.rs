//! HTTP adapter for hedge relationship endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    DedesignateRequest, DesignateResponse, HealthResponse, RedesignateRequest,
    RunRegressionRequest,
};
pub use handlers::{health, HedgeRelationshipAppState};
pub use routes::hedge_relationship_routes;
