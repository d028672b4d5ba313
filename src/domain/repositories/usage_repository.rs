//! Repository trait for usage events and the analytics queries over them.

use crate::domain::entities::{FullUrlUseCount, NewUsageEvent, UsageEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for usage events.
///
/// The stored events are the only source for both reports; nothing derived
/// from them is persisted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUsageRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Appends one usage event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link no longer exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record(&self, event: NewUsageEvent) -> Result<UsageEvent, AppError>;

    /// Returns every recorded usage event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_all(&self) -> Result<Vec<UsageEvent>, AppError>;

    /// Returns the usage events of one link, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_link(&self, link_id: i64) -> Result<Vec<UsageEvent>, AppError>;

    /// For every link with at least one usage event, its full URL and the
    /// number of events recorded against it.
    ///
    /// Events whose link no longer exists are not attributed to any URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn use_counts_by_full_url(&self) -> Result<Vec<FullUrlUseCount>, AppError>;

    /// Counts all usage events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
