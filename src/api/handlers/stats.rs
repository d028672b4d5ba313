//! Handlers for the public usage reports.

use axum::{Json, extract::State};

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::stats::TopDomainResponse;
use crate::domain::analytics::UsageGraph;
use crate::error::AppError;
use crate::state::AppState;

/// Hosts ranked by redirect count, at most 20.
///
/// # Endpoint
///
/// `GET /v1/stats/top`
///
/// ```json
/// { "result": "ok", "data": [ { "website": "google.com", "usesCount": 3 } ] }
/// ```
pub async fn top_domains_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TopDomainResponse>>>, AppError> {
    let top = state.stats_service.top_domains().await?;
    Ok(Json(ApiResponse::ok(
        top.into_iter().map(TopDomainResponse::from).collect(),
    )))
}

/// Redirects per UTC day, hour and minute.
///
/// # Endpoint
///
/// `GET /v1/stats/graph`
///
/// ```json
/// { "result": "ok", "data": { "2020-02-01": { "5": { "10": 2, "11": 1 } } } }
/// ```
pub async fn usage_graph_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UsageGraph>>, AppError> {
    let graph = state.stats_service.usage_graph().await?;
    Ok(Json(ApiResponse::ok(graph)))
}
