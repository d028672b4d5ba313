//! Handlers for user registration and session endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::users::{CreateUserRequest, MeResponse};
use crate::api::extractors::{AppJson, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a user.
///
/// # Endpoint
///
/// `POST /v1/users`
///
/// ```json
/// { "name": "alice", "password": "secret1" }
/// ```
///
/// # Errors
///
/// Returns 400 if the name is shorter than 5 characters or the password is
/// not 5 to 16 characters, 409 if the name is taken.
pub async fn register_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(&payload.name, &payload.password)
        .await?;
    tracing::info!("Registered user {} ({})", user.name, user.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::empty())))
}

/// Returns the authenticated user.
///
/// `GET /v1/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<MeResponse>>, AppError> {
    let user = state.user_service.get(user.id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// Always answers 401 so browsers forget cached basic credentials.
///
/// `GET /v1/logout`
pub async fn logout_handler(Extension(user): Extension<AuthUser>) -> AppError {
    tracing::debug!("Logout for {}", user.name);
    AppError::unauthorized("Logged out", json!({}))
}
