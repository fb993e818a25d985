//! Account representations exposed over HTTP

use serde::{Deserialize, Serialize};

use crate::domain::{PasswordRecord, Role};

/// Account view (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&PasswordRecord> for UserResponse {
    fn from(record: &PasswordRecord) -> Self {
        Self {
            username: record.username().to_string(),
            email: record.email().to_string(),
            full_name: record.full_name().map(str::to_string),
            role: record.role(),
            active: record.is_active(),
            created_at: record.created_at().to_rfc3339(),
            updated_at: record.updated_at().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_omits_hash() {
        let record = PasswordRecord::new(
            "john",
            "john@example.com",
            "$argon2id$v=19$secret-hash",
            Role::User,
        );

        let body = serde_json::to_string(&UserResponse::from(&record)).unwrap();
        assert!(body.contains("\"username\":\"john\""));
        assert!(body.contains("\"email\":\"john@example.com\""));
        assert!(!body.contains("full_name"));
        assert!(body.contains("\"role\":\"user\""));
        assert!(!body.contains("argon2id"));
    }

    #[test]
    fn test_user_response_includes_full_name() {
        let record = PasswordRecord::new("john", "john@example.com", "hash", Role::User)
            .with_full_name("John Doe");

        let response = UserResponse::from(&record);
        assert_eq!(response.full_name.as_deref(), Some("John Doe"));
    }
}
