//! Authentication API endpoints
//!
//! Registration, token issuance and refresh, logout and token verification.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireSession;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, UserResponse};
use crate::domain::{IssuedToken, Role};
use crate::infrastructure::identity::RegisterRequest;

const TOKEN_TYPE: &str = "bearer";

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(issue_token))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout))
        .route("/verify", get(verify))
}

/// Self-service sign-up body
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub password: String,
}

/// Credentials submitted for login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Token pair returned on login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Fresh access token returned on refresh
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<IssuedToken> for AccessTokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            expires_in: issued.expires_in(),
            access_token: issued.token,
            token_type: TOKEN_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
    pub role: Role,
}

/// POST /auth/register
///
/// Self-service sign-up. New accounts always get the `user` role.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterBody>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(username = %request.username, "Registering account");

    let record = state
        .identity_service
        .register(RegisterRequest {
            username: request.username,
            email: request.email,
            full_name: request.full_name,
            password: request.password,
            role: Role::User,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&record))))
}

/// POST /auth/token
///
/// Exchange a username and password for an access/refresh token pair.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let pair = state
        .token_service
        .authenticate(&request.username, &request.password)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(TokenResponse {
        expires_in: pair.access.expires_in(),
        access_token: pair.access.token,
        refresh_token: pair.refresh.token,
        token_type: TOKEN_TYPE.to_string(),
    }))
}

/// POST /auth/refresh
///
/// Mint a new access token from a refresh token. The refresh token stays valid.
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let issued = state
        .token_service
        .refresh(&request.refresh_token)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(AccessTokenResponse::from(issued)))
}

/// POST /auth/logout
///
/// Revoke the presented access token.
pub async fn logout(
    State(state): State<AppState>,
    RequireSession { session, token }: RequireSession,
) -> Result<Json<LogoutResponse>, ApiError> {
    state
        .token_service
        .revoke(&token)
        .await
        .map_err(ApiError::from)?;

    debug!(subject = %session.subject, "Session logged out");

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /auth/verify
///
/// Report the identity behind the presented access token.
pub async fn verify(
    RequireSession { session, .. }: RequireSession,
) -> Result<Json<VerifyResponse>, ApiError> {
    Ok(Json(VerifyResponse {
        valid: true,
        username: session.subject,
        role: session.role,
    }))
}
