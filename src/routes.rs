//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: storage, cache, usage queue (public)
//! - `/v1/*`             - REST API, see [`crate::api::routes`]
//! - anything else       - JSON 404 `Page not found`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on registration
//! - **Authentication** - HTTP basic on owner-scoped routes
//!
//! Trailing-slash normalization wraps the whole router in [`crate::server`].

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limited` - enables per-IP limiting of registration; the limiter
///   keys on the peer address, so it needs a server started with
///   `into_make_service_with_connect_info`
pub fn app_router(state: AppState, rate_limited: bool) -> Router {
    let mut registration = api::routes::registration_routes();
    if rate_limited {
        registration = registration.layer(rate_limit::layer());
    }

    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let v1 = Router::new()
        .merge(api::routes::public_routes())
        .merge(registration)
        .merge(protected);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/v1", v1)
        .fallback(fallback_handler)
        .with_state(state)
        .layer(tracing::layer())
}
