// Node reports, host metrics and service control endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::common::{api_error, ApiResponse, ApiResult};
use crate::alerts::{AlertMessage, HealthReport};
use crate::host::{NetworkStats, SystemMetrics};
use crate::services::SyncCheck;
use crate::web::AppState;

#[derive(Deserialize)]
pub struct LogsQuery {
    pub lines: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ServiceLogs {
    pub unit: String,
    pub lines: u32,
    pub logs: String,
}

/// Full status report, chunked the same way scheduled updates are
pub async fn get_node_status(State(state): State<AppState>) -> ApiResult<AlertMessage> {
    let report = state.health_service.status_report().await;
    Ok(Json(ApiResponse::success(report)))
}

pub async fn get_node_sync(State(state): State<AppState>) -> ApiResult<SyncCheck> {
    match state.health_service.sync_check().await {
        Ok(check) => {
            let message = crate::alerts::report::sync_summary(&check.verdict);
            Ok(Json(ApiResponse::with_message(check, message)))
        }
        Err(e) => {
            warn!("On-demand sync check failed: {}", e);
            Err(api_error(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

pub async fn get_system_metrics(State(state): State<AppState>) -> ApiResult<SystemMetrics> {
    match state
        .metrics
        .system_metrics(&state.config.disk_mount_point)
        .await
    {
        Ok(metrics) => {
            let message = HealthReport::titled("📈 **Detailed Performance Metrics:**")
                .performance(metrics.clone())
                .render();
            Ok(Json(ApiResponse::with_message(metrics, message)))
        }
        Err(e) => {
            error!("Failed to collect system metrics: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

pub async fn get_network_stats(State(state): State<AppState>) -> ApiResult<NetworkStats> {
    match state.metrics.network_stats().await {
        Ok(stats) => {
            let message = HealthReport::titled("🌐 **Detailed Network Statistics:**")
                .network(stats.clone())
                .render();
            Ok(Json(ApiResponse::with_message(stats, message)))
        }
        Err(e) => {
            error!("Failed to collect network statistics: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// Client versions and validator details, chunked like the status report
pub async fn get_validator_info(State(state): State<AppState>) -> ApiResult<AlertMessage> {
    let report = state.health_service.validator_report().await;
    Ok(Json(ApiResponse::success(report)))
}

pub async fn restart_service(
    Path(unit): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<String> {
    if !state.config.is_watched_service(&unit) {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Service {} is not managed by this monitor", unit),
        ));
    }

    info!("Manual restart requested for {}", unit);
    match state.services.restart(&unit).await {
        Ok(()) => Ok(Json(ApiResponse::with_message(
            unit.clone(),
            format!("✅ {} restarted", unit),
        ))),
        Err(e) => {
            error!("Failed to restart {}: {}", unit, e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("❌ Failed to restart {}: {}", unit, e),
            ))
        }
    }
}

pub async fn get_service_logs(
    Path(unit): Path<String>,
    Query(query): Query<LogsQuery>,
    State(state): State<AppState>,
) -> ApiResult<ServiceLogs> {
    if !state.config.is_watched_service(&unit) {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Service {} is not managed by this monitor", unit),
        ));
    }

    let lines = query.lines.unwrap_or(state.config.log_lines).max(1);
    match state.services.recent_logs(&unit, lines).await {
        Ok(logs) => Ok(Json(ApiResponse::success(ServiceLogs { unit, lines, logs }))),
        Err(e) => {
            error!("Failed to read logs for {}: {}", unit, e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
