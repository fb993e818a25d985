use thiserror::Error;

use super::identity::IdentityValidationError;

/// Errors raised by account management and the identity store
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    /// The identity store could not be reached or failed mid-operation
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Only store failures are worth retrying; everything else is final
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

impl From<IdentityValidationError> for DomainError {
    fn from(err: IdentityValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::{normalize_email, validate_password};

    #[test]
    fn test_rejected_input_becomes_validation_error() {
        let result: Result<(), DomainError> = validate_password("short").map_err(Into::into);

        match result {
            Err(DomainError::Validation { message }) => {
                assert!(message.starts_with("Password is too short"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_email_message_names_the_input() {
        let err = DomainError::from(normalize_email("not-an-address").unwrap_err());
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid email address: 'not-an-address'"
        );
    }

    #[test]
    fn test_only_storage_failures_are_retryable() {
        assert!(DomainError::storage("connection reset").is_retryable());

        for err in [
            DomainError::not_found("User 'ghost' not found"),
            DomainError::conflict("Email 'john@example.com' already registered"),
            DomainError::validation("Current password is incorrect"),
            DomainError::internal("Failed to hash password"),
        ] {
            assert!(!err.is_retryable(), "{err}");
        }
    }
}
