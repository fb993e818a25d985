//! Identity repository trait

use async_trait::async_trait;

use super::entity::PasswordRecord;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for account storage
///
/// The token module only ever calls [`IdentityRepository::get_by_username`];
/// the write methods belong to account management.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Get a record by username
    async fn get_by_username(&self, username: &str) -> Result<Option<PasswordRecord>, DomainError>;

    /// Create a new record
    async fn create(&self, record: PasswordRecord) -> Result<PasswordRecord, DomainError>;

    /// Replace an existing record
    async fn update(&self, record: &PasswordRecord) -> Result<PasswordRecord, DomainError>;

    /// Get a record by its (normalized) email address
    async fn get_by_email(&self, email: &str) -> Result<Option<PasswordRecord>, DomainError>;

    /// List all records ordered by username
    async fn list(&self) -> Result<Vec<PasswordRecord>, DomainError>;

    /// Check if a username exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }

    /// Check if an email address is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
