//! Background persistence of usage events.
//!
//! Redirect handlers only enqueue events (see
//! [`crate::application::services::UsageRecorder`]); this worker drains the
//! queue and writes each event through [`UsageRepository::record`], retrying
//! transient storage errors. Failures end here: they are logged and counted,
//! never reported back to the redirect that produced the event.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::entities::{NewUsageEvent, UsageEvent};
use crate::domain::repositories::UsageRepository;
use crate::error::AppError;

/// A usage event that could not be recorded.
#[derive(Debug, thiserror::Error)]
pub enum RecordingFailure {
    #[error("usage queue is full, event for link {link_id} dropped")]
    QueueFull { link_id: i64 },

    #[error("usage queue is closed, event for link {link_id} dropped")]
    QueueClosed { link_id: i64 },

    #[error("failed to persist usage event for link {link_id}: {source}")]
    Persist {
        link_id: i64,
        #[source]
        source: AppError,
    },
}

/// Tuning for [`run_usage_worker`].
#[derive(Debug, Clone, Copy)]
pub struct WorkerSettings {
    /// Maximum number of events persisted concurrently.
    pub concurrency: usize,
    /// Retries after the first failed attempt.
    pub max_retries: usize,
    /// Base of the exponential backoff, in milliseconds.
    pub backoff_base_ms: u64,
    pub max_backoff: Duration,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            concurrency: 4,
            max_retries: 3,
            backoff_base_ms: 10,
            max_backoff: Duration::from_secs(2),
        }
    }
}

/// Consumes usage events until every sender is dropped.
///
/// At most `settings.concurrency` events are in flight; the worker waits for
/// them to finish before returning.
pub async fn run_usage_worker<R>(
    mut rx: mpsc::Receiver<NewUsageEvent>,
    repository: Arc<R>,
    settings: WorkerSettings,
) where
    R: UsageRepository + ?Sized + 'static,
{
    let concurrency = settings.concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            let _permit = permit;
            match persist_with_retry(repository.as_ref(), event, settings).await {
                Ok(recorded) => {
                    metrics::counter!("usage_events_recorded_total").increment(1);
                    debug!(
                        "Recorded usage event {} for link {}",
                        recorded.id, recorded.link_id
                    );
                }
                Err(failure) => {
                    metrics::counter!("usage_events_failed_total").increment(1);
                    error!("{}", failure);
                }
            }
        });
    }

    let _ = semaphore.acquire_many(concurrency as u32).await;
    info!("Usage worker stopped");
}

/// Persists one event, retrying only internal storage errors.
///
/// A missing link (deleted between redirect and persistence) is not retried.
///
/// # Errors
///
/// Returns [`RecordingFailure::Persist`] once retries are exhausted or the
/// error is not retryable.
pub async fn persist_with_retry<R>(
    repository: &R,
    event: NewUsageEvent,
    settings: WorkerSettings,
) -> Result<UsageEvent, RecordingFailure>
where
    R: UsageRepository + ?Sized,
{
    let link_id = event.link_id;
    let strategy = ExponentialBackoff::from_millis(settings.backoff_base_ms.max(1))
        .max_delay(settings.max_backoff)
        .map(jitter)
        .take(settings.max_retries);

    RetryIf::start(
        strategy,
        || {
            let event = event.clone();
            async move { repository.record(event).await }
        },
        |e: &AppError| matches!(e, AppError::Internal { .. }),
    )
    .await
    .map_err(|source| RecordingFailure::Persist { link_id, source })
}
