use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::handlers::{create_depositor_routes, health_check};
use crate::AppState;

/// Full application router with middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(create_depositor_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(state: AppState) -> Result<(), std::io::Error> {
    let host: std::net::IpAddr = state
        .settings
        .api
        .host
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let addr = SocketAddr::new(host, state.settings.api.port);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);
    info!("API endpoints available at:");
    info!("  GET /deposit?tokenSymbol&amountIn[&chainId]");
    info!("  GET /mint?chainId&amountOut");
    info!("  GET /getDepositedEachToken?chainId&tokenSymbol[&isValue]");
    info!("  GET /getTotalDepositedOnChain?chainId");
    info!("  GET /getTotalDepositedOverralChain");
    info!("  GET /getMaxOutput[?chainId]");
    info!("  GET /getMinted[?chainId]");
    info!("  GET /getHealthFactor[?chainId]");
    info!("  GET /getTokenPrice?tokenSymbol[&chainId]");
    info!("  GET /health");

    axum::serve(listener, app).await
}
