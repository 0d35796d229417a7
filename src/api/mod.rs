//! REST API for scenario state and simulation results.
//!
//! Provides three GET endpoints:
//! - `/state`: scenario summary plus both strategies' KPIs
//! - `/load`: hourly load curves for both strategies
//! - `/results`: per-EV results with strategy and id-range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::config::ScenarioConfig;
use crate::sim::engine::FleetRun;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after both strategy runs complete and wrapped in
/// `Arc`; no locks needed since all data is read-only.
pub struct AppState {
    /// Scenario the runs were produced from.
    pub scenario: ScenarioConfig,
    /// Completed uncontrolled run.
    pub uncontrolled: FleetRun,
    /// Completed smart run over the same fleet.
    pub smart: FleetRun,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/load", get(handlers::get_load))
        .route("/results", get(handlers::get_results))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
