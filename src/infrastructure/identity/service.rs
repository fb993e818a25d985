//! Account management: provisioning, password changes, activation, roles

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::identity::{
    normalize_email, normalize_full_name, validate_password, validate_username,
    IdentityRepository, PasswordRecord, Role,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for provisioning a new account
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password: String,
    pub role: Role,
}

/// Request for updating an account's profile; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Request for changing an account's password
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Service that owns every write to the identity store
pub struct IdentityService {
    repository: Arc<dyn IdentityRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl std::fmt::Debug for IdentityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityService")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl IdentityService {
    pub fn new(repository: Arc<dyn IdentityRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Provision a new active account
    pub async fn register(&self, request: RegisterRequest) -> Result<PasswordRecord, DomainError> {
        validate_username(&request.username)?;
        validate_password(&request.password)?;
        let email = normalize_email(&request.email)?;
        let full_name = normalize_full_name(request.full_name.as_deref())?;

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already registered",
                request.username
            )));
        }

        if self.repository.email_exists(&email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let mut record = PasswordRecord::new(&request.username, email, password_hash, request.role);
        record.set_full_name(full_name);

        let created = self.repository.create(record).await?;
        info!(username = %created.username(), role = %created.role(), "Account registered");

        Ok(created)
    }

    pub async fn get(&self, username: &str) -> Result<Option<PasswordRecord>, DomainError> {
        self.repository.get_by_username(username).await
    }

    pub async fn list(&self) -> Result<Vec<PasswordRecord>, DomainError> {
        self.repository.list().await
    }

    /// Update the email address and display name of an account
    pub async fn update_profile(
        &self,
        username: &str,
        request: UpdateProfileRequest,
    ) -> Result<PasswordRecord, DomainError> {
        let mut record = self.require(username).await?;

        if let Some(email) = request.email.as_deref() {
            let email = normalize_email(email)?;

            if email != record.email() {
                if let Some(owner) = self.repository.get_by_email(&email).await? {
                    if owner.username() != username {
                        return Err(DomainError::conflict(format!(
                            "Email '{}' already registered",
                            email
                        )));
                    }
                }
                record.set_email(email);
            }
        }

        if request.full_name.is_some() {
            let full_name = normalize_full_name(request.full_name.as_deref())?;
            record.set_full_name(full_name);
        }

        let updated = self.repository.update(&record).await?;
        info!(username = %username, "Profile updated");

        Ok(updated)
    }

    /// Change a password after checking the current one
    pub async fn change_password(
        &self,
        username: &str,
        request: ChangePasswordRequest,
    ) -> Result<PasswordRecord, DomainError> {
        let mut record = self.require(username).await?;

        if !self.hasher.verify(&request.current_password, record.password_hash()) {
            return Err(DomainError::validation("Current password is incorrect"));
        }

        validate_password(&request.new_password)?;

        let new_hash = self.hasher.hash(&request.new_password)?;
        record.set_password_hash(new_hash);

        let updated = self.repository.update(&record).await?;
        info!(username = %username, "Password changed");

        Ok(updated)
    }

    pub async fn deactivate(&self, username: &str) -> Result<PasswordRecord, DomainError> {
        let mut record = self.require(username).await?;
        record.deactivate();

        let updated = self.repository.update(&record).await?;
        info!(username = %username, "Account deactivated");

        Ok(updated)
    }

    pub async fn activate(&self, username: &str) -> Result<PasswordRecord, DomainError> {
        let mut record = self.require(username).await?;
        record.activate();

        let updated = self.repository.update(&record).await?;
        info!(username = %username, "Account activated");

        Ok(updated)
    }

    /// Change an account's role; tokens already issued keep the old role
    pub async fn change_role(
        &self,
        username: &str,
        role: Role,
    ) -> Result<PasswordRecord, DomainError> {
        let mut record = self.require(username).await?;
        record.set_role(role);

        let updated = self.repository.update(&record).await?;
        info!(username = %username, role = %role, "Role changed");

        Ok(updated)
    }

    /// Provision the fixed demo accounts, skipping any that already exist
    pub async fn seed_demo_users(&self) -> Result<usize, DomainError> {
        let demo = [
            ("admin", "admin@example.com", "Admin User", "admin123", Role::Admin, true),
            ("john", "john@example.com", "John Doe", "john1234", Role::User, true),
            (
                "disabled_user",
                "disabled@example.com",
                "Disabled User",
                "disabled123",
                Role::User,
                false,
            ),
        ];

        let mut created = 0;

        for (username, email, full_name, password, role, active) in demo {
            if self.repository.username_exists(username).await? {
                continue;
            }

            let password_hash = self.hasher.hash(password)?;
            let mut record =
                PasswordRecord::new(username, email, password_hash, role).with_full_name(full_name);
            if !active {
                record.deactivate();
            }

            self.repository.create(record).await?;
            created += 1;
        }

        if created > 0 {
            warn!(
                count = created,
                "Demo accounts seeded with well-known passwords. Do not enable in production"
            );
        }

        Ok(created)
    }

    async fn require(&self, username: &str) -> Result<PasswordRecord, DomainError> {
        self.repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", username)))
    }
}
