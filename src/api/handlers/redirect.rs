//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its full URL and records the use.
///
/// # Endpoint
///
/// `GET /v1/s/{short}`
///
/// The usage event is queued, not awaited; a full queue or a failing store
/// never affects the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let full_url = state
        .redirect_service
        .resolve_and_record(&short, Utc::now())
        .await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, full_url)]))
}
