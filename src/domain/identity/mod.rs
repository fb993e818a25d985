//! Identity domain
//!
//! Account records consulted by the token module: salted password hashes,
//! roles, and the active flag.

mod entity;
mod repository;
mod validation;

pub use entity::{PasswordRecord, Role};
pub use repository::IdentityRepository;
pub use validation::{
    normalize_email, normalize_full_name, validate_password, validate_username,
    IdentityValidationError,
};

#[cfg(test)]
pub use repository::MockIdentityRepository;
