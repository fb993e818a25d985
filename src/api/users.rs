//! Self-service account endpoints

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use serde::Deserialize;

use crate::api::middleware::RequireSession;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, UserResponse};
use crate::infrastructure::identity::{ChangePasswordRequest, UpdateProfileRequest};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user).put(update_profile))
        .route("/me/password", put(change_password))
}

/// Profile fields to change; omitted fields are left as they are
#[derive(Debug, Deserialize)]
pub struct UpdateProfileBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordBody {
    pub current_password: String,
    pub new_password: String,
}

/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    RequireSession { session, .. }: RequireSession,
) -> Result<Json<UserResponse>, ApiError> {
    let record = state
        .identity_service
        .get(&session.subject)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", session.subject)))?;

    Ok(Json(UserResponse::from(&record)))
}

/// PUT /users/me
pub async fn update_profile(
    State(state): State<AppState>,
    RequireSession { session, .. }: RequireSession,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let record = state
        .identity_service
        .update_profile(
            &session.subject,
            UpdateProfileRequest {
                email: body.email,
                full_name: body.full_name,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&record)))
}

/// PUT /users/me/password
///
/// Tokens issued before the change stay valid until they expire or are revoked.
pub async fn change_password(
    State(state): State<AppState>,
    RequireSession { session, .. }: RequireSession,
    Json(body): Json<ChangePasswordBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let record = state
        .identity_service
        .change_password(
            &session.subject,
            ChangePasswordRequest {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&record)))
}
