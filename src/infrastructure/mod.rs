//! Infrastructure layer - External service implementations

pub mod auth;
pub mod identity;
pub mod logging;
