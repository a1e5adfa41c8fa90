// rest_api/src/lib.rs
// HTTP surface of Healthify: one axum router per service over a shared database.

use anyhow::Context;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod errors;
pub mod extract;
pub mod payloads;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;

pub use crate::config::ServiceKind;
pub use crate::errors::{ApiResult, RestApiError};
pub use crate::state::AppState;

/// Builds the router of `state.service` with CORS, request tracing and `/health`.
pub fn build_router(state: AppState) -> Router {
    let routes = match state.service {
        ServiceKind::Patient => routes::patient::router(),
        ServiceKind::Doctor => routes::doctor::router(),
        ServiceKind::Admin => routes::admin::router(),
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);

    routes
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serves one service on an already bound listener until `shutdown_rx` fires
/// (or its sender is dropped).
pub async fn serve(listener: TcpListener, state: AppState, shutdown_rx: oneshot::Receiver<()>) -> anyhow::Result<()> {
    let service = state.service;
    let addr = listener.local_addr().context("Failed to read listener address")?;
    info!("{} service listening on {}", service, addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
            info!("Received shutdown signal for the {} service", service);
        })
        .await
        .with_context(|| format!("{service} service failed while serving"))?;

    info!("{} service stopped", service);
    Ok(())
}

/// Binds `host:port` and serves the service of `state` on it.
pub async fn start_server(
    host: &str,
    port: u16,
    state: AppState,
    shutdown_rx: oneshot::Receiver<()>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to address {host}:{port}"))?;
    serve(listener, state, shutdown_rx).await
}
