// Monitoring session endpoints

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;
use tracing::info;

use super::common::{ApiResponse, ApiResult};
use crate::scheduler::{ActivationOutcome, DeactivationOutcome, SessionStatus, TickOutcome};
use crate::web::AppState;

#[derive(Debug, Serialize)]
pub struct ActivationResponse {
    pub outcome: ActivationOutcome,
    pub session: SessionStatus,
}

#[derive(Debug, Serialize)]
pub struct DeactivationResponse {
    pub outcome: DeactivationOutcome,
    pub session: SessionStatus,
}

#[derive(Debug, Serialize)]
pub struct TickResponse {
    pub outcome: TickOutcome,
}

pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    Ok(Json(ApiResponse::success(
        state.scheduler.active_sessions().await,
    )))
}

pub async fn get_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<SessionStatus> {
    Ok(Json(ApiResponse::success(
        state.scheduler.session_status(&session_id).await,
    )))
}

pub async fn activate_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<ActivationResponse> {
    info!("Activation requested for session {}", session_id);
    let outcome = state.scheduler.activate(&session_id).await;
    let message = outcome.message(state.scheduler.interval());
    let session = state.scheduler.session_status(&session_id).await;

    Ok(Json(ApiResponse::with_message(
        ActivationResponse { outcome, session },
        message,
    )))
}

pub async fn deactivate_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<DeactivationResponse> {
    info!("Deactivation requested for session {}", session_id);
    let outcome = state.scheduler.deactivate(&session_id).await;
    let session = state.scheduler.session_status(&session_id).await;

    Ok(Json(ApiResponse::with_message(
        DeactivationResponse { outcome, session },
        outcome.message(),
    )))
}

/// Run a monitoring update right away for an active session
pub async fn tick_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<TickResponse> {
    let outcome = state.scheduler.tick(&session_id).await;
    Ok(Json(ApiResponse::success(TickResponse { outcome })))
}
