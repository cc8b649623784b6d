//! Publish port for normalized job messages.

use crate::job::domain::{JobMessage, PushIdentity};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Outbound transport for job messages.
///
/// Delivery guarantees (ordering, retries, back-pressure) belong to the
/// implementation. The handler calls [`JobPublisher::publish_job`] at most
/// once per notification and never retries it.
#[async_trait]
pub trait JobPublisher: Send + Sync {
    /// Publishes a job message to the destination derived from `push`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the transport fails to deliver the
    /// message.
    async fn publish_job(&self, push: &PushIdentity, job: &JobMessage) -> PublishResult<()>;
}

/// Errors returned by publisher implementations.
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// Transport-layer failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl PublishError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
