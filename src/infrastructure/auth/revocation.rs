//! In-memory revocation set and its background sweeper

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::token::{Clock, RevocationSet};

/// Token id -> expiry of the revoked token
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationSet {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryRevocationSet {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationSet for InMemoryRevocationSet {
    async fn insert(&self, token_id: &str, expires_at: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        entries.entry(token_id.to_string()).or_insert(expires_at);
    }

    async fn contains(&self, token_id: &str) -> bool {
        self.entries.read().await.contains_key(token_id)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        before - entries.len()
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Periodically drop revocation entries whose tokens have expired
pub fn spawn_revocation_sweeper(
    revocations: Arc<dyn RevocationSet>,
    clock: Arc<dyn Clock>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let purged = revocations.purge_expired(clock.now()).await;
            if purged > 0 {
                debug!(purged, "Purged expired revocation entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::auth::clock::ManualClock;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_contains() {
        let set = InMemoryRevocationSet::new();

        assert!(!set.contains("jti-1").await);
        set.insert("jti-1", t0()).await;
        assert!(set.contains("jti-1").await);
        assert!(!set.contains("jti-2").await);
    }

    #[tokio::test]
    async fn test_insert_is_idempotent() {
        let set = InMemoryRevocationSet::new();

        set.insert("jti-1", t0()).await;
        set.insert("jti-1", t0()).await;

        assert_eq!(set.len().await, 1);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let set = InMemoryRevocationSet::new();

        set.insert("short", t0() + chrono::Duration::minutes(30)).await;
        set.insert("long", t0() + chrono::Duration::days(7)).await;

        assert_eq!(set.purge_expired(t0()).await, 0);
        assert_eq!(set.purge_expired(t0() + chrono::Duration::minutes(30)).await, 1);
        assert!(!set.contains("short").await);
        assert!(set.contains("long").await);
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let set = InMemoryRevocationSet::new();

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let set = set.clone();
                tokio::spawn(async move { set.insert(&format!("jti-{i}"), t0()).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(set.len().await, 64);
    }

    #[tokio::test]
    async fn test_sweeper_purges() {
        let set = Arc::new(InMemoryRevocationSet::new());
        set.insert("gone", t0()).await;
        set.insert("kept", t0() + chrono::Duration::days(1)).await;

        let clock = Arc::new(ManualClock::new(t0() + chrono::Duration::seconds(1)));
        let handle = spawn_revocation_sweeper(set.clone(), clock, Duration::from_millis(10));

        for _ in 0..100 {
            if set.len().await == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert!(!set.contains("gone").await);
        assert!(set.contains("kept").await);
    }
}
