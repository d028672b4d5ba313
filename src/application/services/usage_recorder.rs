//! Enqueues usage events for the background worker.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;

use crate::domain::entities::NewUsageEvent;
use crate::domain::usage_worker::RecordingFailure;

/// Producer side of the usage event queue.
///
/// Cheap to clone; every clone feeds the same bounded channel, drained by
/// [`crate::domain::usage_worker::run_usage_worker`].
#[derive(Clone)]
pub struct UsageRecorder {
    sender: mpsc::Sender<NewUsageEvent>,
}

impl UsageRecorder {
    pub fn new(sender: mpsc::Sender<NewUsageEvent>) -> Self {
        Self { sender }
    }

    /// Creates a recorder together with the receiver the worker should drain.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<NewUsageEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Records one use of `link_id` at `used_at`.
    ///
    /// Never blocks and never fails the caller: a full or closed queue drops
    /// the event with a warning.
    pub fn record_use(&self, link_id: i64, used_at: DateTime<Utc>) {
        if let Err(failure) = self.try_record(link_id, used_at) {
            metrics::counter!("usage_events_dropped_total").increment(1);
            warn!("{}", failure);
        }
    }

    /// Like [`Self::record_use`] but reports why the event was dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingFailure::QueueFull`] or [`RecordingFailure::QueueClosed`].
    pub fn try_record(&self, link_id: i64, used_at: DateTime<Utc>) -> Result<(), RecordingFailure> {
        self.sender
            .try_send(NewUsageEvent { link_id, used_at })
            .map_err(|e| match e {
                TrySendError::Full(_) => RecordingFailure::QueueFull { link_id },
                TrySendError::Closed(_) => RecordingFailure::QueueClosed { link_id },
            })
    }

    /// True once the worker has gone away.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots left in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }

    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}
