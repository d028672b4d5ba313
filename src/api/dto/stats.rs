//! DTOs for reporting endpoints.
//!
//! The usage graph is returned as [`crate::domain::analytics::UsageGraph`]
//! directly; it already serializes as the nested day/hour/minute map.

use serde::Serialize;

use crate::domain::analytics::DomainUseCount;

/// One entry of the top domains list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDomainResponse {
    pub website: String,
    pub uses_count: u64,
}

impl From<DomainUseCount> for TopDomainResponse {
    fn from(entry: DomainUseCount) -> Self {
        Self {
            website: entry.host,
            uses_count: entry.uses,
        }
    }
}
