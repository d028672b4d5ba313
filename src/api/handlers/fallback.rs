//! Handler for unmatched routes.

use serde_json::json;

use crate::error::AppError;

/// Answers every unknown path with the JSON 404 envelope.
pub async fn fallback_handler() -> AppError {
    AppError::not_found("Page not found", json!({}))
}
