use thiserror::Error;

/// Failure kinds of the token authentication operations
///
/// Messages never include passwords, raw tokens, or signing secrets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Token signature is invalid or the token is malformed")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token kind mismatch: expected {expected} token")]
    WrongKind { expected: &'static str },

    #[error("Token has been revoked")]
    Revoked,

    #[error("Token subject is unknown or inactive")]
    UnknownSubject,

    #[error("Role '{required}' required")]
    Forbidden { required: &'static str },

    #[error("Identity store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AuthError {
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Only a transient store failure is worth retrying after backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    /// Stable machine-readable code for transport layers
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "token_expired",
            Self::WrongKind { .. } => "wrong_token_kind",
            Self::Revoked => "token_revoked",
            Self::UnknownSubject => "unknown_subject",
            Self::Forbidden { .. } => "forbidden",
            Self::StoreUnavailable { .. } => "store_unavailable",
            Self::Internal { .. } => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_store_unavailable_is_retryable() {
        assert!(AuthError::store_unavailable("timeout").is_retryable());

        let terminal = [
            AuthError::InvalidCredentials,
            AuthError::InvalidSignature,
            AuthError::Expired,
            AuthError::WrongKind { expected: "access" },
            AuthError::Revoked,
            AuthError::UnknownSubject,
            AuthError::Forbidden { required: "admin" },
            AuthError::internal("boom"),
        ];

        for err in terminal {
            assert!(!err.is_retryable(), "{err:?} should not be retryable");
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthError::WrongKind { expected: "refresh" }.to_string(),
            "Token kind mismatch: expected refresh token"
        );
        assert_eq!(
            AuthError::Forbidden { required: "admin" }.to_string(),
            "Role 'admin' required"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(AuthError::Expired.code(), "token_expired");
        assert_eq!(AuthError::store_unavailable("x").code(), "store_unavailable");
    }
}
