//! Handlers for owner-scoped link management.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::links::{CreateShortRequest, ShortDetailsResponse, ShortResponse};
use crate::api::extractors::{AppJson, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

fn parse_link_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request("Invalid link id", json!({ "id": raw })))
}

/// Lists the caller's links.
///
/// `GET /v1/shorts`
pub async fn list_shorts_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<ShortResponse>>>, AppError> {
    let links = state.link_service.list_by_owner(user.id).await?;
    Ok(Json(ApiResponse::ok(
        links.into_iter().map(ShortResponse::from).collect(),
    )))
}

/// Shortens a URL for the caller.
///
/// # Endpoint
///
/// `POST /v1/shorts`
///
/// ```json
/// { "full": "https://google.com" }
/// ```
///
/// # Errors
///
/// Returns 400 `invalid_url` if the URL is not absolute.
pub async fn create_short_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppJson(payload): AppJson<CreateShortRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShortResponse>>), AppError> {
    payload.validate()?;

    let link = state.link_service.create(user.id, payload.full).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(link.into()))))
}

/// Returns one of the caller's links with its usage history.
///
/// `GET /v1/shorts/{id}`
///
/// # Errors
///
/// Returns 404 if the caller owns no link with that id.
pub async fn get_short_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ShortDetailsResponse>>, AppError> {
    let id = parse_link_id(&id)?;
    let link = state.link_service.get_owned(id, user.id).await?;
    let uses = state.stats_service.link_uses(link.id).await?;

    Ok(Json(ApiResponse::ok(ShortDetailsResponse::new(link, uses))))
}

/// Deletes one of the caller's links and its usage history.
///
/// `DELETE /v1/shorts/{id}`
///
/// # Errors
///
/// Returns 404 if the caller owns no link with that id.
pub async fn delete_short_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_link_id(&id)?;
    state.link_service.delete(id, user.id).await?;

    Ok(Json(ApiResponse::empty()))
}
