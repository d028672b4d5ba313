//! Usage reporting: top domains and the usage graph.

use std::sync::Arc;

use crate::domain::analytics::{DomainUseCount, TOP_DOMAINS_LIMIT, UsageGraph, rank_domains};
use crate::domain::entities::UsageEvent;
use crate::domain::repositories::UsageRepository;
use crate::error::AppError;

/// Read-only reports over the stored usage events.
///
/// Both reports are recomputed from storage on every call; nothing is cached
/// between calls.
pub struct StatsService<U: UsageRepository + ?Sized> {
    usage_repository: Arc<U>,
}

impl<U: UsageRepository + ?Sized> StatsService<U> {
    pub fn new(usage_repository: Arc<U>) -> Self {
        Self { usage_repository }
    }

    /// The 20 most used hosts, by use count descending then host descending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn top_domains(&self) -> Result<Vec<DomainUseCount>, AppError> {
        let counts = self.usage_repository.use_counts_by_full_url().await?;
        Ok(rank_domains(counts, TOP_DOMAINS_LIMIT))
    }

    /// Every usage event bucketed by UTC day, hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn usage_graph(&self) -> Result<UsageGraph, AppError> {
        let events = self.usage_repository.list_all().await?;
        Ok(UsageGraph::from_events(&events))
    }

    /// Usage events of a single link, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn link_uses(&self, link_id: i64) -> Result<Vec<UsageEvent>, AppError> {
        self.usage_repository.list_by_link(link_id).await
    }

    /// Counts all recorded uses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn total_uses(&self) -> Result<i64, AppError> {
        self.usage_repository.count().await
    }
}
