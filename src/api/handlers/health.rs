//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Storage**: Counts links
/// 2. **Usage queue**: Checks the worker is still draining and reports free slots
/// 3. **Cache**: Redis PING (always ok when caching is disabled)
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = check_storage(&state).await;
    let usage_queue = check_usage_queue(&state);
    let cache = check_cache(&state).await;

    let all_healthy = storage.is_ok() && usage_queue.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage,
            usage_queue,
            cache,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    match state.link_service.count().await {
        Ok(links) => CheckStatus::ok(format!("Connected, {} links", links)),
        Err(e) => CheckStatus::error(format!("Storage error: {}", e)),
    }
}

fn check_usage_queue(state: &AppState) -> CheckStatus {
    let recorder = &state.usage_recorder;
    if recorder.is_closed() {
        CheckStatus::error("Usage queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Free slots: {}/{}",
            recorder.capacity(),
            recorder.max_capacity()
        ))
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Cache available")
    } else {
        CheckStatus::error("Redis connection failed")
    }
}
