// server/mod.rs — HTTP surface.
//
// Endpoints:
//   GET /        dashboard payload (query: period, start_date, end_date)
//   GET /health  liveness probe

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppState;

pub async fn start_server(state: Arc<AppState>) -> Result<()> {
    let bind = format!("{}:{}", state.config.bind_address, state.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(state);

    info!("dashboard disponível em http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::dashboard))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
