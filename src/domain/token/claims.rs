//! Token claims, kinds, and the session context derived from them

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::identity::Role;

use super::error::AuthError;

/// Which verification sites accept a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived, authorizes API calls
    Access,
    /// Long-lived, only exchanged for a new access token
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Role copied from the identity at issuance
    pub role: Role,
    /// Token kind
    pub typ: TokenKind,
    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,
    /// Unique token identifier, the revocation key
    pub jti: String,
}

impl TokenClaims {
    /// Create claims issued at `now` and valid for `lifetime`
    ///
    /// Fails when `lifetime` is not positive or `now + lifetime` leaves the
    /// representable date range.
    pub fn new(
        subject: impl Into<String>,
        role: Role,
        kind: TokenKind,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, AuthError> {
        if lifetime <= Duration::zero() {
            return Err(AuthError::internal("Token lifetime must be positive"));
        }

        let exp = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AuthError::internal("Token expiry is out of range"))?;

        Ok(Self {
            sub: subject.into(),
            role,
            typ: kind,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// A token is expired from the second `exp` is reached
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }

    pub fn session(&self) -> SessionContext {
        SessionContext {
            subject: self.sub.clone(),
            role: self.role,
        }
    }
}

fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(ts, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A freshly minted token together with its decoded claims
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded wire form
    pub token: String,
    pub claims: TokenClaims,
}

impl IssuedToken {
    pub fn kind(&self) -> TokenKind {
        self.claims.typ
    }

    pub fn subject(&self) -> &str {
        &self.claims.sub
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }

    /// Remaining lifetime in whole seconds at issuance
    pub fn expires_in(&self) -> i64 {
        self.claims.exp - self.claims.iat
    }
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Identity resolved from a verified token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub subject: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_claims() {
        let claims = TokenClaims::new(
            "john",
            Role::User,
            TokenKind::Access,
            fixed_now(),
            Duration::minutes(30),
        )
        .unwrap();

        assert_eq!(claims.sub, "john");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_unique_ids() {
        let issue = || {
            TokenClaims::new("a", Role::User, TokenKind::Access, fixed_now(), Duration::minutes(1))
                .unwrap()
        };
        assert_ne!(issue().jti, issue().jti);
    }

    #[test]
    fn test_lifetime_past_date_range_is_an_error() {
        let lifetime = Duration::try_days(100_000_000).unwrap();

        let result =
            TokenClaims::new("admin", Role::Admin, TokenKind::Refresh, fixed_now(), lifetime);
        assert!(matches!(result, Err(AuthError::Internal { .. })));
    }

    #[test]
    fn test_non_positive_lifetime_is_an_error() {
        let result =
            TokenClaims::new("john", Role::User, TokenKind::Access, fixed_now(), Duration::zero());
        assert!(matches!(result, Err(AuthError::Internal { .. })));
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = TokenClaims::new(
            "john",
            Role::User,
            TokenKind::Access,
            fixed_now(),
            Duration::minutes(30),
        )
        .unwrap();

        assert!(!claims.is_expired_at(fixed_now()));
        assert!(!claims.is_expired_at(fixed_now() + Duration::seconds(30 * 60 - 1)));
        assert!(claims.is_expired_at(fixed_now() + Duration::minutes(30)));
        assert!(claims.is_expired_at(fixed_now() + Duration::days(1)));
    }

    #[test]
    fn test_wire_field_names() {
        let claims = TokenClaims::new(
            "admin",
            Role::Admin,
            TokenKind::Refresh,
            fixed_now(),
            Duration::days(7),
        )
        .unwrap();
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["sub"], "admin");
        assert_eq!(value["role"], "admin");
        assert_eq!(value["typ"], "refresh");
        assert_eq!(value["iat"], fixed_now().timestamp());
    }

    #[test]
    fn test_session_from_claims() {
        let claims = TokenClaims::new(
            "admin",
            Role::Admin,
            TokenKind::Access,
            fixed_now(),
            Duration::minutes(5),
        )
        .unwrap();

        assert_eq!(
            claims.session(),
            SessionContext {
                subject: "admin".to_string(),
                role: Role::Admin
            }
        );
        assert_eq!(claims.issued_at(), fixed_now());
    }
}
