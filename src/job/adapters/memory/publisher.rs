//! In-memory publisher capturing every job it is handed.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::job::{
    domain::{JobMessage, PushIdentity},
    ports::{JobPublisher, PublishError, PublishResult},
};

/// A job captured by [`RecordingJobPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedJob {
    /// Routing key the job was addressed to.
    pub routing_key: String,
    /// Push identity passed to the publisher.
    pub push: PushIdentity,
    /// The published job message.
    pub job: JobMessage,
}

/// Thread-safe publisher that records jobs instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct RecordingJobPublisher {
    published: Arc<RwLock<Vec<PublishedJob>>>,
}

impl RecordingJobPublisher {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded job in publish order.
    #[must_use]
    pub fn published(&self) -> Vec<PublishedJob> {
        self.published
            .read()
            .map(|guard| guard.to_vec())
            .unwrap_or_default()
    }

    /// Returns the most recently recorded job.
    #[must_use]
    pub fn last(&self) -> Option<PublishedJob> {
        self.published
            .read()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }

    /// Returns the number of recorded jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.published.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` when nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("publish recorder lock poisoned")]
struct PoisonedRecorder;

#[async_trait]
impl JobPublisher for RecordingJobPublisher {
    async fn publish_job(&self, push: &PushIdentity, job: &JobMessage) -> PublishResult<()> {
        let mut guard = self
            .published
            .write()
            .map_err(|_| PublishError::transport(PoisonedRecorder))?;
        guard.push(PublishedJob {
            routing_key: push.routing_key(),
            push: push.clone(),
            job: job.clone(),
        });
        Ok(())
    }
}
