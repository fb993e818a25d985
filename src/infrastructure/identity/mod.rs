//! Identity infrastructure module
//!
//! Argon2 password hashing, the in-memory identity store, and the account
//! management service.

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryIdentityRepository;
pub use service::{ChangePasswordRequest, IdentityService, RegisterRequest, UpdateProfileRequest};
