//! Pure analytics over the usage event history.
//!
//! Both reports are recomputed from scratch on every request; no aggregation
//! state outlives a call.
//!
//! - [`top_domains`] - Hosts ranked by total redirect count
//! - [`usage_graph`] - Day / hour / minute histogram of redirects

pub mod top_domains;
pub mod usage_graph;

pub use top_domains::{DomainUseCount, TOP_DOMAINS_LIMIT, compare_ranked, rank_domains};
pub use usage_graph::{HourCounts, MinuteCounts, UsageGraph};
