//! Admin API endpoints for managing accounts

pub mod users;

use axum::{
    routing::{get, put},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/{username}", get(users::get_user))
        .route("/users/{username}/disable", put(users::disable_user))
        .route("/users/{username}/enable", put(users::enable_user))
        .route("/users/{username}/role", put(users::change_role))
}
