//! Identity input validation

use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur while validating account input
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdentityValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username contains invalid character '{0}'. Allowed: letters, digits, '_' and '-'")]
    InvalidUsernameCharacter(char),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Full name exceeds maximum length of {0} characters")]
    FullNameTooLong(usize),

    #[error("Unknown role '{0}'. Allowed: admin, user, moderator")]
    UnknownRole(String),
}

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_FULL_NAME_LENGTH: usize = 100;

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Minimum 3 characters
/// - Maximum 50 characters
/// - Only alphanumeric characters, underscores, and hyphens
pub fn validate_username(username: &str) -> Result<(), IdentityValidationError> {
    if username.is_empty() {
        return Err(IdentityValidationError::EmptyUsername);
    }

    if username.len() < MIN_USERNAME_LENGTH {
        return Err(IdentityValidationError::UsernameTooShort(
            MIN_USERNAME_LENGTH,
        ));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(IdentityValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    for c in username.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(IdentityValidationError::InvalidUsernameCharacter(c));
        }
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 8 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), IdentityValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(IdentityValidationError::PasswordTooShort(
            MIN_PASSWORD_LENGTH,
        ));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(IdentityValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate an email address and return its stored (trimmed, lowercase) form
pub fn normalize_email(email: &str) -> Result<String, IdentityValidationError> {
    let normalized = email.trim().to_ascii_lowercase();

    if !normalized.validate_email() {
        return Err(IdentityValidationError::InvalidEmail(email.to_string()));
    }

    Ok(normalized)
}

/// Validate an optional display name; blank names are stored as absent
pub fn normalize_full_name(
    full_name: Option<&str>,
) -> Result<Option<String>, IdentityValidationError> {
    let Some(name) = full_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    if name.chars().count() > MAX_FULL_NAME_LENGTH {
        return Err(IdentityValidationError::FullNameTooLong(MAX_FULL_NAME_LENGTH));
    }

    Ok(Some(name.to_string()))
}
