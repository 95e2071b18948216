// Bearer-token check applied to every API route

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use tracing::warn;

use super::common::{api_error, ApiResponse};
use crate::web::AppState;

/// True when `headers` carry `Authorization: Bearer <expected_key>`.
/// An empty expected key never matches.
pub fn validate_api_key(headers: &HeaderMap, expected_key: &str) -> bool {
    if expected_key.is_empty() {
        return false;
    }
    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return token == expected_key;
            }
        }
    }
    false
}

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<()>>)> {
    if !validate_api_key(request.headers(), &state.config.api_key) {
        warn!(
            "Rejected unauthenticated {} {}",
            request.method(),
            request.uri().path()
        );
        return Err(api_error(
            StatusCode::UNAUTHORIZED,
            "Invalid API key".to_string(),
        ));
    }
    Ok(next.run(request).await)
}
