//! Token domain
//!
//! Types shared by token issuance and verification: claims, kinds, the
//! session context handed to callers, the error taxonomy, and the traits for
//! injected process-wide state (clock, revocation set).

mod claims;
mod clock;
mod error;
mod revocation;

pub use claims::{IssuedToken, SessionContext, TokenClaims, TokenKind, TokenPair};
pub use clock::Clock;
pub use error::AuthError;
pub use revocation::RevocationSet;
