//! Argon2id password hashing

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Hashes and checks account passwords
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password with a fresh random salt into a PHC string
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a stored PHC string
    ///
    /// Implementations must compare digests in constant time. Unparseable
    /// hashes verify as `false`.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id hasher with configurable cost parameters
///
/// Stored hashes carry their own parameters, so raising the cost does not
/// invalidate existing records.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Build a hasher with explicit memory (KiB), iteration and lane costs
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, DomainError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| DomainError::configuration(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        // Algorithm, version and costs come from the stored string
        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(8, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_records_algorithm_and_costs() {
        let hash = cheap_hasher().hash("admin123").unwrap();

        assert!(hash.starts_with("$argon2id$v=19$m=8,t=1,p=1$"), "{hash}");
        assert!(!hash.contains("admin123"));
    }

    #[test]
    fn test_salts_differ_between_accounts() {
        let hasher = cheap_hasher();

        let john = hasher.hash("shared-password").unwrap();
        let jane = hasher.hash("shared-password").unwrap();

        assert_ne!(john, jane);
        assert!(hasher.verify("shared-password", &john));
        assert!(hasher.verify("shared-password", &jane));
    }

    #[test]
    fn test_hashes_survive_cost_changes() {
        let old = cheap_hasher().hash("john1234").unwrap();

        let stronger = Argon2Hasher::with_params(16, 2, 1).unwrap();
        assert!(stronger.verify("john1234", &old));
        assert!(!stronger.verify("john12345", &old));
    }

    #[test]
    fn test_unusable_hashes_never_verify() {
        let hasher = cheap_hasher();

        assert!(!hasher.verify("admin123", ""));
        assert!(!hasher.verify("admin123", "admin123"));
        assert!(!hasher.verify(
            "admin123",
            "$pbkdf2-sha256$i=1000$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA"
        ));
    }

    #[test]
    fn test_rejects_invalid_costs() {
        let result = Argon2Hasher::with_params(1, 0, 1);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
