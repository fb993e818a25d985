//! Account administration endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, UserResponse};
use crate::domain::Role;

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<ListUsersResponse>, ApiError> {
    debug!("Admin listing users");

    let records = state
        .identity_service
        .list()
        .await
        .map_err(ApiError::from)?;

    let users: Vec<UserResponse> = records.iter().map(UserResponse::from).collect();
    let total = users.len();

    Ok(Json(ListUsersResponse { users, total }))
}

/// GET /admin/users/{username}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let record = state
        .identity_service
        .get(&username)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", username)))?;

    Ok(Json(UserResponse::from(&record)))
}

/// PUT /admin/users/{username}/disable
pub async fn disable_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(admin = %admin.subject, username = %username, "Admin disabling user");

    if admin.subject == username {
        return Err(ApiError::bad_request("Administrators cannot disable their own account")
            .with_code("self_disable"));
    }

    let record = state
        .identity_service
        .deactivate(&username)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&record)))
}

/// PUT /admin/users/{username}/enable
pub async fn enable_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(admin = %admin.subject, username = %username, "Admin enabling user");

    let record = state
        .identity_service
        .activate(&username)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&record)))
}

/// PUT /admin/users/{username}/role
pub async fn change_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(username): Path<String>,
    Json(request): Json<ChangeRoleRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let role = request
        .role
        .parse::<Role>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(admin = %admin.subject, username = %username, role = %role, "Admin changing role");

    let record = state
        .identity_service
        .change_role(&username, role)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&record)))
}
