//! API middleware components

pub mod security;
pub mod session;

pub use security::security_headers_middleware;
pub use session::{extract_bearer_token, RequireAdmin, RequireSession};
