//! Health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

/// GET /health
///
/// Liveness: 200 whenever the process is serving requests.
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// GET /ready
///
/// Readiness: the identity store must answer before logins can succeed.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let store_check = check_identity_store(&state).await;
    let status = store_check.status;

    let revoked = state.revocations.len().await;
    let revocation_check = HealthCheck {
        name: "revocation_set".to_string(),
        status: HealthStatus::Healthy,
        message: Some(format!("{} revoked token ids tracked", revoked)),
        latency_ms: 0,
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![store_check, revocation_check]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

async fn check_identity_store(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let timeout = state.token_service.config().store_timeout;

    let (status, message) =
        match tokio::time::timeout(timeout, state.identity_service.list()).await {
            Ok(Ok(_)) => (HealthStatus::Healthy, None),
            Ok(Err(e)) => (HealthStatus::Unhealthy, Some(e.to_string())),
            Err(_) => (HealthStatus::Unhealthy, Some("Identity store timed out".to_string())),
        };

    HealthCheck {
        name: "identity_store".to_string(),
        status,
        message,
        latency_ms: start.elapsed().as_millis() as u64,
    }
}
