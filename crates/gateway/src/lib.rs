//! API Gateway Library
//!
//! This crate provides the HTTP REST API in front of the user service:
//! request binding, validation and JSON rendering.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use user_service_lib::UserService;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Serve the HTTP API over the given user service until the listener fails.
pub async fn run(
    user_service: Arc<dyn UserService>,
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = config.bind_address().parse()?;

    let state = AppState::new(user_service);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
