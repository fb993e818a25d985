use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Time source for issuance and expiry checks
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}
