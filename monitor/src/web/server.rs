// File: monitor/src/web/server.rs
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::future::Future;
use tower_http::trace::TraceLayer;

/// Serve the command API until `shutdown` resolves
pub async fn start_web_server<F>(state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // === SESSION ROUTES ===
        .route("/api/sessions", get(handlers::list_sessions))
        .route("/api/sessions/{session_id}", get(handlers::get_session))
        .route(
            "/api/sessions/{session_id}/activate",
            post(handlers::activate_session),
        )
        .route(
            "/api/sessions/{session_id}/deactivate",
            post(handlers::deactivate_session),
        )
        .route(
            "/api/sessions/{session_id}/tick",
            post(handlers::tick_session),
        )
        // === NODE ROUTES ===
        .route("/api/node/status", get(handlers::get_node_status))
        .route("/api/node/sync", get(handlers::get_node_sync))
        .route("/api/node/validator", get(handlers::get_validator_info))
        // === HOST ROUTES ===
        .route("/api/system", get(handlers::get_system_metrics))
        .route("/api/system/network", get(handlers::get_network_stats))
        // === SERVICE ROUTES ===
        .route(
            "/api/services/{unit}/restart",
            post(handlers::restart_service),
        )
        .route("/api/services/{unit}/logs", get(handlers::get_service_logs))
        // Add middleware
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::require_api_key,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
