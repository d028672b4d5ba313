//! Day / hour / minute histogram of redirects.
//!
//! Buckets are keyed in UTC: the day is the UTC calendar date (`YYYY-MM-DD`)
//! and hour/minute are UTC clock fields. Two timestamps for the same instant
//! land in the same bucket whatever offset they were expressed in.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::domain::entities::UsageEvent;

/// Minute of the hour (0-59) to redirect count.
pub type MinuteCounts = BTreeMap<u32, u64>;

/// Hour of the day (0-23) to per-minute counts.
pub type HourCounts = BTreeMap<u32, MinuteCounts>;

/// Sparse histogram `day -> hour -> minute -> count`.
///
/// A bucket exists only once an event has landed in it; there are never
/// zero-valued entries at any level. Folding is commutative, so the result
/// does not depend on event order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UsageGraph {
    days: BTreeMap<String, HourCounts>,
}

impl UsageGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a slice of stored events.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a UsageEvent>,
    {
        let mut graph = Self::new();
        for event in events {
            graph.add_use(&event.used_at);
        }
        graph
    }

    /// Counts one redirect at `at`.
    pub fn add_use<Tz: TimeZone>(&mut self, at: &DateTime<Tz>) {
        let at = at.with_timezone(&Utc);
        let day = at.format("%Y-%m-%d").to_string();

        *self
            .days
            .entry(day)
            .or_default()
            .entry(at.hour())
            .or_default()
            .entry(at.minute())
            .or_insert(0) += 1;
    }

    /// Count in one bucket, zero if the bucket does not exist.
    pub fn count(&self, day: &str, hour: u32, minute: u32) -> u64 {
        self.days
            .get(day)
            .and_then(|hours| hours.get(&hour))
            .and_then(|minutes| minutes.get(&minute))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all buckets.
    pub fn total(&self) -> u64 {
        self.days
            .values()
            .flat_map(|hours| hours.values())
            .flat_map(|minutes| minutes.values())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Read access to the underlying nested mapping.
    pub fn days(&self) -> &BTreeMap<String, HourCounts> {
        &self.days
    }

    pub fn into_inner(self) -> BTreeMap<String, HourCounts> {
        self.days
    }
}

impl<Tz: TimeZone> Extend<DateTime<Tz>> for UsageGraph {
    fn extend<I: IntoIterator<Item = DateTime<Tz>>>(&mut self, iter: I) {
        for at in iter {
            self.add_use(&at);
        }
    }
}

impl<Tz: TimeZone> FromIterator<DateTime<Tz>> for UsageGraph {
    fn from_iter<I: IntoIterator<Item = DateTime<Tz>>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}
