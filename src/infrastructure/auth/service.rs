//! Token authentication service: login, verification, refresh, revocation

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::identity::{IdentityRepository, PasswordRecord, Role};
use crate::domain::token::{
    AuthError, Clock, IssuedToken, RevocationSet, SessionContext, TokenClaims, TokenKind,
    TokenPair,
};
use crate::domain::DomainError;
use crate::infrastructure::identity::PasswordHasher;

use super::jwt::JwtCodec;

/// Lifetimes and limits for the token service
#[derive(Debug, Clone)]
pub struct TokenAuthConfig {
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// Upper bound on a single identity store lookup
    pub store_timeout: StdDuration,
}

impl TokenAuthConfig {
    pub fn new(
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
        store_timeout: StdDuration,
    ) -> Self {
        Self {
            access_token_ttl,
            refresh_token_ttl,
            store_timeout,
        }
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        }
    }
}

impl Default for TokenAuthConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: Duration::minutes(30),
            refresh_token_ttl: Duration::days(7),
            store_timeout: StdDuration::from_secs(2),
        }
    }
}

fn audit_rejected(username: &str, message: &str) {
    info!(target: "audit", username = %username, outcome = "rejected", "{}", message);
}

/// Check that a verified session carries the required role
pub fn require_role(session: &SessionContext, required: Role) -> Result<(), AuthError> {
    if session.role != required {
        return Err(AuthError::Forbidden {
            required: required.as_str(),
        });
    }

    Ok(())
}

/// Mints, verifies, refreshes, and revokes signed tokens
///
/// All shared state (identity store, revocation set, clock) is injected so
/// that each instance, and each test, owns its own.
pub struct TokenAuthService {
    config: TokenAuthConfig,
    codec: JwtCodec,
    identities: Arc<dyn IdentityRepository>,
    hasher: Arc<dyn PasswordHasher>,
    revocations: Arc<dyn RevocationSet>,
    clock: Arc<dyn Clock>,
    /// Verified against when the username is unknown, so a miss costs the
    /// same as a wrong password
    dummy_hash: String,
}

impl std::fmt::Debug for TokenAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthService")
            .field("config", &self.config)
            .field("codec", &self.codec)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl TokenAuthService {
    pub fn new(
        config: TokenAuthConfig,
        codec: JwtCodec,
        identities: Arc<dyn IdentityRepository>,
        hasher: Arc<dyn PasswordHasher>,
        revocations: Arc<dyn RevocationSet>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        if config.access_token_ttl <= Duration::zero()
            || config.refresh_token_ttl <= Duration::zero()
        {
            return Err(DomainError::configuration("Token lifetimes must be positive"));
        }

        let dummy_hash = hasher.hash("token-gate-timing-equalizer")?;

        Ok(Self {
            config,
            codec,
            identities,
            hasher,
            revocations,
            clock,
            dummy_hash,
        })
    }

    pub fn config(&self) -> &TokenAuthConfig {
        &self.config
    }

    /// Exchange a username and password for an access/refresh token pair
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, AuthError> {
        if username.is_empty() || password.is_empty() {
            audit_rejected(username, "Login with empty credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let record = match self.lookup(username).await? {
            Some(record) => record,
            None => {
                self.check_password(password, &self.dummy_hash).await;
                audit_rejected(username, "Login for unknown user");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let password_ok = self.check_password(password, record.password_hash()).await;

        if !password_ok {
            audit_rejected(username, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !record.is_active() {
            audit_rejected(username, "Login for inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        let now = self.clock.now();
        let access = self.issue(record.username(), record.role(), TokenKind::Access, now)?;
        let refresh = self.issue(record.username(), record.role(), TokenKind::Refresh, now)?;

        info!(
            target: "audit",
            username = %username,
            role = %record.role(),
            outcome = "accepted",
            "Login succeeded"
        );

        Ok(TokenPair { access, refresh })
    }

    /// Verify a presented token and resolve the caller's identity
    ///
    /// Checks run in order: signature, expiry, kind, revocation, subject.
    /// The role is taken from the signed payload, not from the store.
    pub async fn verify(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> Result<SessionContext, AuthError> {
        let claims = self.codec.decode(token)?;
        self.check_claims(&claims, expected).await?;

        Ok(claims.session())
    }

    /// Mint a new access token from a valid refresh token
    ///
    /// The refresh token itself is neither rotated nor invalidated.
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedToken, AuthError> {
        let session = self.verify(refresh_token, TokenKind::Refresh).await?;
        let now = self.clock.now();
        let access = self.issue(&session.subject, session.role, TokenKind::Access, now)?;

        debug!(subject = %session.subject, "Access token refreshed");

        Ok(access)
    }

    /// Revoke a token until its natural expiry
    ///
    /// Idempotent. Already expired tokens are accepted without recording
    /// anything; tokens whose signature does not verify are rejected.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.codec.decode(token)?;
        let now = self.clock.now();

        if claims.is_expired_at(now) {
            debug!(subject = %claims.sub, "Ignoring revocation of expired token");
            return Ok(());
        }

        self.revocations.insert(&claims.jti, claims.expires_at()).await;

        let purged = self.revocations.purge_expired(now).await;
        if purged > 0 {
            debug!(purged, "Purged expired revocation entries");
        }

        info!(target: "audit", subject = %claims.sub, kind = %claims.typ, "Token revoked");

        Ok(())
    }

    async fn check_claims(
        &self,
        claims: &TokenClaims,
        expected: TokenKind,
    ) -> Result<(), AuthError> {
        if claims.is_expired_at(self.clock.now()) {
            return Err(AuthError::Expired);
        }

        if claims.typ != expected {
            return Err(AuthError::WrongKind {
                expected: expected.as_str(),
            });
        }

        if self.revocations.contains(&claims.jti).await {
            return Err(AuthError::Revoked);
        }

        match self.lookup(&claims.sub).await? {
            Some(record) if record.is_active() => Ok(()),
            _ => Err(AuthError::UnknownSubject),
        }
    }

    fn issue(
        &self,
        subject: &str,
        role: Role,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let claims = TokenClaims::new(subject, role, kind, now, self.config.ttl(kind))?;
        let token = self.codec.encode(&claims)?;

        Ok(IssuedToken { token, claims })
    }

    async fn lookup(&self, username: &str) -> Result<Option<PasswordRecord>, AuthError> {
        let lookup = self.identities.get_by_username(username);

        match tokio::time::timeout(self.config.store_timeout, lookup).await {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(e)) => {
                warn!(error = %e, "Identity store lookup failed");
                Err(AuthError::store_unavailable(e.to_string()))
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "Identity store lookup timed out"
                );
                Err(AuthError::store_unavailable("lookup timed out"))
            }
        }
    }

    /// Argon2 is CPU bound, so verification runs off the async workers
    async fn check_password(&self, password: &str, hash: &str) -> bool {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .unwrap_or(false)
    }
}
