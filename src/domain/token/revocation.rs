//! Revocation set trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Process-wide record of token ids invalidated before their natural expiry
///
/// Entries carry the expiry of the token they revoke; once that instant has
/// passed the token fails verification as expired anyway, so the entry may
/// be purged.
#[async_trait]
pub trait RevocationSet: Send + Sync + Debug {
    /// Record a token id. Inserting an id that is already present is a no-op.
    async fn insert(&self, token_id: &str, expires_at: DateTime<Utc>);

    /// Check whether a token id has been revoked
    async fn contains(&self, token_id: &str) -> bool;

    /// Drop entries whose expiry is at or before `now`, returning how many
    async fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    /// Number of entries currently held
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
