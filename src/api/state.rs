//! Application state for shared services

use std::sync::Arc;

use crate::domain::RevocationSet;
use crate::infrastructure::auth::TokenAuthService;
use crate::infrastructure::identity::IdentityService;

/// Services shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub token_service: Arc<TokenAuthService>,
    pub identity_service: Arc<IdentityService>,
    /// Same set the token service writes to; exposed for readiness and sweeping
    pub revocations: Arc<dyn RevocationSet>,
}
