//! In-memory identity repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::identity::{IdentityRepository, PasswordRecord};
use crate::domain::DomainError;

/// In-memory implementation of IdentityRepository, keyed by username
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityRepository {
    records: Arc<RwLock<HashMap<String, PasswordRecord>>>,
}

impl InMemoryIdentityRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial records
    #[cfg(test)]
    pub fn with_records(records: Vec<PasswordRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.username().to_string(), r))
            .collect();

        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn get_by_username(&self, username: &str) -> Result<Option<PasswordRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(username).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<PasswordRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.email() == email).cloned())
    }

    async fn create(&self, record: PasswordRecord) -> Result<PasswordRecord, DomainError> {
        let mut records = self.records.write().await;
        let username = record.username().to_string();

        if records.contains_key(&username) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        if records.values().any(|r| r.email() == record.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                record.email()
            )));
        }

        records.insert(username, record.clone());

        Ok(record)
    }

    async fn update(&self, record: &PasswordRecord) -> Result<PasswordRecord, DomainError> {
        let mut records = self.records.write().await;
        let username = record.username();

        let email_taken = records
            .values()
            .any(|r| r.username() != username && r.email() == record.email());
        if email_taken {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                record.email()
            )));
        }

        match records.get_mut(username) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record.clone())
            }
            None => Err(DomainError::not_found(format!(
                "User '{}' not found",
                username
            ))),
        }
    }

    async fn list(&self) -> Result<Vec<PasswordRecord>, DomainError> {
        let records = self.records.read().await;

        let mut result: Vec<PasswordRecord> = records.values().cloned().collect();
        result.sort_by(|a, b| a.username().cmp(b.username()));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::Role;

    fn record(username: &str) -> PasswordRecord {
        PasswordRecord::new(
            username,
            format!("{}@example.com", username),
            "hashed_password",
            Role::User,
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryIdentityRepository::new();

        repo.create(record("john")).await.unwrap();

        let retrieved = repo.get_by_username("john").await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().username(), "john");

        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repo = InMemoryIdentityRepository::new();

        repo.create(record("john")).await.unwrap();

        let result = repo.create(record("john")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_is_visible_immediately() {
        let repo = InMemoryIdentityRepository::new();
        let mut john = repo.create(record("john")).await.unwrap();

        john.deactivate();
        repo.update(&john).await.unwrap();

        let retrieved = repo.get_by_username("john").await.unwrap().unwrap();
        assert!(!retrieved.is_active());
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryIdentityRepository::new();

        let result = repo.update(&record("ghost")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_includes_inactive_sorted() {
        let repo = InMemoryIdentityRepository::with_records(vec![
            record("carol"),
            record("bob").inactive(),
            record("alice"),
        ]);

        let all = repo.list().await.unwrap();
        let names: Vec<&str> = all.iter().map(|r| r.username()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert!(!all[1].is_active());
    }

    #[tokio::test]
    async fn test_email_lookup_and_uniqueness() {
        let repo = InMemoryIdentityRepository::with_records(vec![record("alice")]);

        let found = repo.get_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(found.username(), "alice");
        assert!(!repo.email_exists("bob@example.com").await.unwrap());

        let clash = PasswordRecord::new("bob", "alice@example.com", "hash", Role::User);
        let result = repo.create(clash).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email() {
        let repo = InMemoryIdentityRepository::with_records(vec![record("alice"), record("bob")]);

        let mut bob = repo.get_by_username("bob").await.unwrap().unwrap();
        bob.set_email("alice@example.com");

        let result = repo.update(&bob).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_username_exists() {
        let repo = InMemoryIdentityRepository::with_records(vec![record("alice")]);

        assert!(repo.username_exists("alice").await.unwrap());
        assert!(!repo.username_exists("bob").await.unwrap());
    }
}
