//! Hedge Lifecycle server binary.
//!
//! Loads configuration, installs the tracing subscriber, wires the gateway
//! and cache into the lifecycle orchestrator and serves the HTTP API.

use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hedge_lifecycle::adapters::http::{api_router, HedgeRelationshipAppState};
use hedge_lifecycle::adapters::{
    HedgeApiClient, HedgeApiConfig, InMemoryHedgeGateway, InMemoryReferenceCache, SystemClock,
};
use hedge_lifecycle::application::LifecycleOrchestrator;
use hedge_lifecycle::config::{AppConfig, ServerConfig};
use hedge_lifecycle::ports::{Clock, HedgeAccountingGateway};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let gateway = build_gateway(&config, clock.as_ref())?;
    let orchestrator = LifecycleOrchestrator::new(
        gateway,
        Arc::new(InMemoryReferenceCache::new()),
        clock,
        config.cache.ttl(),
    );

    let app = api_router(HedgeRelationshipAppState::new(Arc::new(orchestrator)))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, environment = ?config.server.environment, "Hedge lifecycle server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Hedge lifecycle server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));

    if server.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_gateway(
    config: &AppConfig,
    clock: &dyn Clock,
) -> Result<Arc<dyn HedgeAccountingGateway>, BoxError> {
    match config.gateway.base_url.as_deref().filter(|_| !config.gateway.is_offline()) {
        Some(base_url) => {
            let mut api = HedgeApiConfig::new(base_url).with_timeout(config.gateway.timeout());
            if let Some(token) = config.gateway.api_token.clone() {
                api = api.with_api_token(token);
            }
            tracing::info!(base_url, "Using Hedge Accounting API gateway");
            Ok(Arc::new(HedgeApiClient::new(api)?))
        }
        None => {
            tracing::warn!("No gateway base URL configured; using in-memory gateway");
            Ok(Arc::new(InMemoryHedgeGateway::new(clock.today())))
        }
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
