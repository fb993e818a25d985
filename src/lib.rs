//! Token Gate
//!
//! JWT access/refresh token authentication service:
//! - Username/password login issuing short-lived access and long-lived refresh tokens
//! - Stateless verification with signing-secret rotation
//! - Revocation of individual tokens before expiry
//! - Account management and role checks

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use anyhow::Context;
use chrono::TimeDelta;
use tracing::info;

use api::state::AppState;
use domain::{Clock, IdentityRepository, RevocationSet};
use infrastructure::{
    auth::{InMemoryRevocationSet, JwtCodec, SystemClock, TokenAuthConfig, TokenAuthService},
    identity::{Argon2Hasher, IdentityService, InMemoryIdentityRepository, PasswordHasher},
};

/// Create application state from configuration using the system clock
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    create_app_state_with_clock(config, Arc::new(SystemClock)).await
}

/// Create application state with an explicit clock
pub async fn create_app_state_with_clock(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<AppState> {
    let auth = &config.auth;
    auth.validate().map_err(anyhow::Error::msg)?;

    let codec = JwtCodec::new(auth.secrets.as_slice()).context("Invalid signing secrets")?;
    info!(secrets = codec.key_count(), "JWT codec initialized");

    let repository: Arc<dyn IdentityRepository> = Arc::new(InMemoryIdentityRepository::new());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());
    let revocations: Arc<dyn RevocationSet> = Arc::new(InMemoryRevocationSet::new());

    let identity_service = Arc::new(IdentityService::new(repository.clone(), hasher.clone()));

    if auth.seed_demo_users {
        identity_service
            .seed_demo_users()
            .await
            .context("Failed to seed demo accounts")?;
    }

    let access_token_ttl = i64::try_from(auth.access_token_minutes)
        .ok()
        .and_then(TimeDelta::try_minutes)
        .context("auth.access_token_minutes is out of range")?;
    let refresh_token_ttl = i64::try_from(auth.refresh_token_days)
        .ok()
        .and_then(TimeDelta::try_days)
        .context("auth.refresh_token_days is out of range")?;

    let token_config = TokenAuthConfig::new(
        access_token_ttl,
        refresh_token_ttl,
        StdDuration::from_millis(auth.store_timeout_ms),
    );

    let token_service = TokenAuthService::new(
        token_config,
        codec,
        repository,
        hasher,
        revocations.clone(),
        clock,
    )
    .context("Failed to create token service")?;

    Ok(AppState {
        token_service: Arc::new(token_service),
        identity_service,
        revocations,
    })
}
