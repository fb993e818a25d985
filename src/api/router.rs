use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::admin;
use super::auth;
use super::health;
use super::middleware::security_headers_middleware;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Login, refresh and token introspection
        .nest("/auth", auth::create_auth_router())
        .nest("/users", users::create_users_router())
        .nest("/admin", admin::create_admin_router())
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
}
