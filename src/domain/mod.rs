//! Domain layer - Core business logic and entities

pub mod error;
pub mod identity;
pub mod token;

pub use error::DomainError;
pub use identity::{IdentityRepository, PasswordRecord, Role};
pub use token::{
    AuthError, Clock, IssuedToken, RevocationSet, SessionContext, TokenClaims, TokenKind,
    TokenPair,
};
