//! Status handler translating run notifications into published job reports.
//!
//! The handler is stateless: each notification is resolved, built and
//! published (or suppressed) independently, and failures propagate to the
//! caller, which owns acknowledgement and redelivery.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::HandlerConfig;
use crate::job::{
    domain::{
        JobMessage, JobMessageBuilder, JobResult, LogReferenceError, PushIdentity, RouteError, Run,
        RunId, RunOutcomeError, TaskDefinition, TaskId, TaskStatus, resolve_outcome,
    },
    ports::{JobPublisher, PublishError},
};

/// Inbound status notification for one run of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotification {
    /// Task status snapshot including every run so far.
    pub status: TaskStatus,
    /// Identifier of the run this notification is about.
    pub run_id: RunId,
}

impl StatusNotification {
    /// Creates a notification about `run_id` within `status`.
    #[must_use]
    pub const fn new(status: TaskStatus, run_id: RunId) -> Self {
        Self { status, run_id }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        self.status.task_id()
    }
}

/// What happened to a handled notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// A job message was published.
    Published {
        /// Routing key the message was addressed to.
        routing_key: String,
        /// The published message.
        job: Box<JobMessage>,
    },
    /// The run produces no job message.
    Suppressed,
}

/// Service-level errors for status handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The selected routing key could not be parsed.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// The task carries no reportable routing key.
    #[error("task {task_id} has no route matching prefix '{prefix}'")]
    NoRoute {
        /// Task missing a route.
        task_id: TaskId,
        /// Configured routing-key prefix.
        prefix: String,
    },

    /// The notification references a run the status does not contain.
    #[error("task {task_id} has no run {run_id}")]
    UnknownRun {
        /// Task whose status was searched.
        task_id: TaskId,
        /// Requested run index.
        run_id: RunId,
    },

    /// The run's state and reason codes have no defined outcome.
    #[error(transparent)]
    MalformedRun(#[from] RunOutcomeError),

    /// The log reference could not be rendered.
    #[error(transparent)]
    Logs(#[from] LogReferenceError),

    /// The publisher failed.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Result type for status handling.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Orchestrates run resolution, message assembly and publication.
#[derive(Clone)]
pub struct StatusHandler<P>
where
    P: JobPublisher,
{
    publisher: Arc<P>,
    builder: JobMessageBuilder,
    config: HandlerConfig,
}

impl<P> StatusHandler<P>
where
    P: JobPublisher,
{
    /// Creates a handler from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LogReferenceError`] when the configured log URL template
    /// does not render.
    pub fn new(publisher: Arc<P>, config: &HandlerConfig) -> Result<Self, LogReferenceError> {
        let builder = JobMessageBuilder::new(config.log_resolver()?);
        Ok(Self {
            publisher,
            builder,
            config: config.clone(),
        })
    }

    /// Creates a handler with the default configuration.
    #[must_use]
    pub fn with_defaults(publisher: Arc<P>) -> Self {
        Self {
            publisher,
            builder: JobMessageBuilder::default(),
            config: HandlerConfig::default(),
        }
    }

    /// Handles a notification, deriving the push from the task's routes.
    ///
    /// The first route addressed to the configured prefix is parsed.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::UnknownRun`] when the run is absent,
    /// [`HandlerError::NoRoute`] when no route matches the prefix,
    /// [`HandlerError::Route`] when that route is malformed, and any error
    /// from [`StatusHandler::handle_for_push`].
    #[instrument(
        level = "debug",
        skip(self, task, notification),
        fields(task_id = %notification.task_id(), run_id = %notification.run_id)
    )]
    pub async fn handle(
        &self,
        task: &TaskDefinition,
        notification: &StatusNotification,
    ) -> HandlerResult<HandleOutcome> {
        select_run(notification)?;
        let route = task
            .routes
            .iter()
            .find(|route| self.config.accepts_route(route))
            .ok_or_else(|| HandlerError::NoRoute {
                task_id: notification.task_id().clone(),
                prefix: self.config.route_prefix.clone(),
            })?;
        let push = PushIdentity::parse(route).inspect_err(|err| {
            warn!(%route, error = %err, "rejecting malformed routing key");
        })?;

        self.handle_for_push(&push, task, notification).await
    }

    /// Handles a notification for an already-parsed push.
    ///
    /// Suppressed runs return [`HandleOutcome::Suppressed`] without touching
    /// the publisher; otherwise the publisher is called exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::UnknownRun`], [`HandlerError::MalformedRun`],
    /// [`HandlerError::Logs`] or [`HandlerError::Publish`].
    pub async fn handle_for_push(
        &self,
        push: &PushIdentity,
        task: &TaskDefinition,
        notification: &StatusNotification,
    ) -> HandlerResult<HandleOutcome> {
        let run = select_run(notification)?;
        let outcome = resolve_outcome(run).inspect_err(|err| {
            warn!(error = %err, "run has no defined job outcome");
        })?;

        let Some(job) = self
            .builder
            .build(push, task, &notification.status, run, outcome)?
        else {
            debug!(
                state = run.state().as_str(),
                reason_created = run.reason_created().as_str(),
                "suppressing job message"
            );
            return Ok(HandleOutcome::Suppressed);
        };

        let routing_key = push.routing_key();
        self.publisher.publish_job(push, &job).await?;
        debug!(
            %routing_key,
            state = job.state.as_str(),
            result = job.result.map(JobResult::as_str),
            "published job message"
        );

        Ok(HandleOutcome::Published {
            routing_key,
            job: Box::new(job),
        })
    }
}

fn select_run(notification: &StatusNotification) -> HandlerResult<&Run> {
    notification
        .status
        .run(notification.run_id)
        .ok_or_else(|| HandlerError::UnknownRun {
            task_id: notification.task_id().clone(),
            run_id: notification.run_id,
        })
}
