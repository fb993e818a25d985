//! Identity entity and related types

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::IdentityValidationError;

/// Authorization tag carried by an identity and copied into issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Moderator => "moderator",
        }
    }
}

impl FromStr for Role {
    type Err = IdentityValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            other => Err(IdentityValidationError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored credentials and authorization data for one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRecord {
    /// Login name, unique within the store
    username: String,
    /// Contact address, unique within the store (stored lowercase)
    email: String,
    full_name: Option<String>,
    /// Argon2 PHC string - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    role: Role,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PasswordRecord {
    /// Create a new, active record
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();

        Self {
            username: username.into(),
            email: email.into(),
            full_name: None,
            password_hash: password_hash.into(),
            role,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    pub fn set_full_name(&mut self, full_name: Option<String>) {
        self.full_name = full_name;
        self.touch();
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.touch();
    }

    pub fn activate(&mut self) {
        if !self.active {
            self.active = true;
            self.touch();
        }
    }

    /// Builder-style deactivation, used when provisioning disabled accounts
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in [Role::Admin, Role::User, Role::Moderator] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err, IdentityValidationError::UnknownRole("superuser".into()));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Moderator).unwrap();
        assert_eq!(json, "\"moderator\"");
    }

    #[test]
    fn test_new_record_is_active() {
        let record = PasswordRecord::new("john", "john@example.com", "hash", Role::User);
        assert!(record.is_active());
        assert_eq!(record.role(), Role::User);
    }

    #[test]
    fn test_deactivate_and_activate() {
        let mut record = PasswordRecord::new("john", "john@example.com", "hash", Role::User);

        record.deactivate();
        assert!(!record.is_active());

        record.activate();
        assert!(record.is_active());
    }

    #[test]
    fn test_profile_fields() {
        let mut record = PasswordRecord::new("john", "john@example.com", "hash", Role::User)
            .with_full_name("John Doe");
        assert_eq!(record.email(), "john@example.com");
        assert_eq!(record.full_name(), Some("John Doe"));

        record.set_email("jd@example.com");
        record.set_full_name(None);
        assert_eq!(record.email(), "jd@example.com");
        assert!(record.full_name().is_none());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let record = PasswordRecord::new("john", "john@example.com", "secret-hash", Role::User);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
