//! HTTP basic authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;

use crate::api::extractors::AuthUser;
use crate::{error::AppError, state::AppState};

/// Authenticates requests with `Authorization: Basic base64(name:password)`.
///
/// On success an [`AuthUser`] is inserted into the request extensions for
/// handlers to pick up with `Extension<AuthUser>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Basic` if the header is
/// missing or malformed, or the credentials do not match a user.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/shorts", get(list_shorts_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((name, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st
        .user_service
        .authenticate(&name, password.as_deref().unwrap_or_default())
        .await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(AuthUser {
        id: user.id,
        name: user.name,
    });

    Ok(next.run(req).await)
}
