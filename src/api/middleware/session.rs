//! Bearer token extractors

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{Role, SessionContext, TokenKind};
use crate::infrastructure::auth::require_role;

/// Extractor that requires a valid access token
///
/// The raw token is kept so handlers such as logout can act on it.
#[derive(Debug, Clone)]
pub struct RequireSession {
    pub session: SessionContext,
    pub token: String,
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let session = state
            .token_service
            .verify(&token, TokenKind::Access)
            .await
            .map_err(ApiError::from)?;

        debug!(subject = %session.subject, "Access token accepted");

        Ok(RequireSession { session, token })
    }
}

/// Extractor that requires a valid access token carrying the admin role
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub SessionContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireSession { session, .. } =
            RequireSession::from_request_parts(parts, state).await?;

        require_role(&session, Role::Admin).map_err(ApiError::from)?;

        Ok(RequireAdmin(session))
    }
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let missing = || {
        ApiError::unauthorized(
            "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
        )
        .with_code("missing_token")
    };

    let value = headers.get(header::AUTHORIZATION).ok_or_else(missing)?;
    let value = value
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

    let (scheme, token) = value.split_once(' ').ok_or_else(missing)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(missing());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(missing());
    }

    Ok(token.to_string())
}
