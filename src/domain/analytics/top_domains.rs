//! Ranking of URL hosts by total redirect count.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::entities::FullUrlUseCount;
use crate::utils::url_validator::url_host;

/// Maximum number of hosts returned by the top-domains report.
pub const TOP_DOMAINS_LIMIT: usize = 20;

/// Total redirect count for one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainUseCount {
    pub host: String,
    pub uses: u64,
}

impl DomainUseCount {
    pub fn new(host: impl Into<String>, uses: u64) -> Self {
        Self {
            host: host.into(),
            uses,
        }
    }
}

/// Ranking order: higher count first, ties broken by host name descending.
pub fn compare_ranked(a: &DomainUseCount, b: &DomainUseCount) -> Ordering {
    b.uses.cmp(&a.uses).then_with(|| b.host.cmp(&a.host))
}

/// Groups per-link use counts by host and returns the `limit` busiest hosts.
///
/// URLs that fail to parse or have no host are skipped. Counts of every link
/// sharing a host are summed before ranking.
pub fn rank_domains<I>(counts: I, limit: usize) -> Vec<DomainUseCount>
where
    I: IntoIterator<Item = FullUrlUseCount>,
{
    let mut by_host: HashMap<String, u64> = HashMap::new();

    for FullUrlUseCount { full_url, uses } in counts {
        let Some(host) = url_host(&full_url) else {
            debug!("Skipping unparseable URL in domain ranking: {}", full_url);
            continue;
        };
        *by_host.entry(host).or_insert(0) += uses;
    }

    let mut ranked: Vec<DomainUseCount> = by_host
        .into_iter()
        .map(|(host, uses)| DomainUseCount { host, uses })
        .collect();

    ranked.sort_unstable_by(compare_ranked);
    ranked.truncate(limit);
    ranked
}
