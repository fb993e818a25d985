//! Authentication infrastructure module
//!
//! JWT access/refresh token issuance and verification, the in-memory
//! revocation set, and clock implementations.

mod clock;
mod jwt;
mod revocation;
mod service;

pub use clock::{ManualClock, SystemClock};
pub use jwt::JwtCodec;
pub use revocation::{spawn_revocation_sweeper, InMemoryRevocationSet};
pub use service::{require_role, TokenAuthConfig, TokenAuthService};
