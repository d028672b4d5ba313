//! `/v1` route groups.

use crate::api::handlers::{
    create_short_handler, delete_short_handler, get_short_handler, list_shorts_handler,
    logout_handler, me_handler, redirect_handler, register_handler, top_domains_handler,
    usage_graph_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes open to anyone.
///
/// - `GET /s/{short}`    - Redirect and record the use
/// - `GET /stats/top`    - Top 20 hosts by redirect count
/// - `GET /stats/graph`  - Redirects per day, hour and minute
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/s/{short}", get(redirect_handler))
        .route("/stats/top", get(top_domains_handler))
        .route("/stats/graph", get(usage_graph_handler))
}

/// Account registration, kept apart so it can be rate limited on its own.
///
/// - `POST /users`
pub fn registration_routes() -> Router<AppState> {
    Router::new().route("/users", post(register_handler))
}

/// Routes that need HTTP basic authentication.
///
/// - `GET    /me`            - The caller
/// - `GET    /logout`        - Always 401
/// - `GET    /shorts`        - The caller's links
/// - `POST   /shorts`        - Shorten a URL
/// - `GET    /shorts/{id}`   - One link with its uses
/// - `DELETE /shorts/{id}`   - Delete a link and its uses
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me_handler))
        .route("/logout", get(logout_handler))
        .route(
            "/shorts",
            get(list_shorts_handler).post(create_short_handler),
        )
        .route(
            "/shorts/{id}",
            get(get_short_handler).delete(delete_short_handler),
        )
}
