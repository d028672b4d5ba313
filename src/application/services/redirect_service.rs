//! Resolve-then-record, the operation behind every redirect.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::services::{LinkService, UsageRecorder};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Combines link resolution with usage recording.
///
/// A failed resolution records nothing. A successful one enqueues the usage
/// event and returns without waiting for it to be persisted.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    link_service: Arc<LinkService<L>>,
    recorder: UsageRecorder,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    pub fn new(link_service: Arc<LinkService<L>>, recorder: UsageRecorder) -> Self {
        Self {
            link_service,
            recorder,
        }
    }

    /// Resolves `code` and records one use at `now`.
    ///
    /// Returns the full URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that code.
    /// Returns [`AppError::Internal`] on storage errors. Recording problems
    /// are never returned.
    pub async fn resolve_and_record(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let target = self.link_service.resolve_target(code).await?;
        self.recorder.record_use(target.link_id, now);
        Ok(target.full_url)
    }

    pub fn recorder(&self) -> &UsageRecorder {
        &self.recorder
    }
}
