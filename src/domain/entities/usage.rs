//! Usage event entity representing a single redirect.

use chrono::{DateTime, Utc};

/// One redirect through a link.
///
/// Append-only: never updated, removed only together with its link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEvent {
    pub id: i64,
    pub link_id: i64,
    pub used_at: DateTime<Utc>,
}

impl UsageEvent {
    /// Creates a new UsageEvent instance.
    pub fn new(id: i64, link_id: i64, used_at: DateTime<Utc>) -> Self {
        Self {
            id,
            link_id,
            used_at,
        }
    }
}

/// Input data for recording a usage event.
///
/// The timestamp is taken when the redirect happens, not when the event is
/// persisted, so queueing delay never shifts the event into another bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUsageEvent {
    pub link_id: i64,
    pub used_at: DateTime<Utc>,
}

/// Number of recorded uses for one link, paired with that link's full URL.
///
/// Produced by the grouped aggregation query that feeds domain ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullUrlUseCount {
    pub full_url: String,
    pub uses: u64,
}

impl FullUrlUseCount {
    pub fn new(full_url: impl Into<String>, uses: u64) -> Self {
        Self {
            full_url: full_url.into(),
            uses,
        }
    }
}
